// Probability-based target selection over the public board view.
// Uses no_std and avoids heap allocations.

use rand::Rng;

use super::cell::CellStatus;
use super::config::{BOARD_SIZE, CELL_COUNT};
use super::ship::Orientation;

/// Placements covering more known hits get this factor per hit, so that
/// cells next to a damaged ship stand out.
const HIT_BIAS: f64 = 10.0;

/// Lower temperature concentrates sampling on the most likely cells.
const TEMPERATURE: f64 = 0.5;

/// Compute a probability density over the unknown cells.
///
/// Every placement of every ship length that avoids `Miss` and `Sunk` cells
/// adds weight to the unknown cells it covers. The result is indexed
/// row-major and sums to one, or is all zero when no placement fits.
pub fn calc_pdf(cells: &[CellStatus; CELL_COUNT], lengths: &[usize]) -> [f64; CELL_COUNT] {
    let n = BOARD_SIZE as usize;
    let mut matrix = [0.0f64; CELL_COUNT];

    for &len in lengths.iter() {
        if len == 0 || len > n {
            continue;
        }
        for orient in [Orientation::Horizontal, Orientation::Vertical] {
            let (max_row, max_col) = match orient {
                Orientation::Horizontal => (n, n - len + 1),
                Orientation::Vertical => (n - len + 1, n),
            };
            for r in 0..max_row {
                for c in 0..max_col {
                    let segment = |k: usize| match orient {
                        Orientation::Horizontal => r * n + c + k,
                        Orientation::Vertical => (r + k) * n + c,
                    };
                    let mut valid = true;
                    let mut n_hits = 0i32;
                    for k in 0..len {
                        match cells[segment(k)] {
                            CellStatus::Miss | CellStatus::Sunk => {
                                valid = false;
                                break;
                            }
                            CellStatus::Hit => n_hits += 1,
                            CellStatus::Unknown => {}
                        }
                    }
                    if !valid {
                        continue;
                    }
                    let weight = libm::pow(HIT_BIAS, n_hits as f64);
                    for k in 0..len {
                        let idx = segment(k);
                        if cells[idx] == CellStatus::Unknown {
                            matrix[idx] += weight;
                        }
                    }
                }
            }
        }
    }

    let total: f64 = matrix.iter().sum();
    if total > 0.0 {
        for v in matrix.iter_mut() {
            *v /= total;
        }
    }
    matrix
}

/// Sample an index from `pdf` after sharpening it with `temperature`.
/// Returns `None` when the density is all zero.
pub fn sample_pdf<R: Rng + ?Sized>(
    pdf: &[f64; CELL_COUNT],
    temperature: f64,
    rng: &mut R,
) -> Option<usize> {
    let mut adjusted = [0.0f64; CELL_COUNT];
    let mut total = 0.0;
    for (a, &p) in adjusted.iter_mut().zip(pdf.iter()) {
        *a = if p > 0.0 { libm::pow(p, 1.0 / temperature) } else { 0.0 };
        total += *a;
    }
    if total <= 0.0 {
        return None;
    }
    let threshold: f64 = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    let mut last = None;
    for (idx, &a) in adjusted.iter().enumerate() {
        if a <= 0.0 {
            continue;
        }
        cumulative += a;
        last = Some(idx);
        if threshold < cumulative {
            return Some(idx);
        }
    }
    last
}

/// Choose the next cell to fire at, or `None` if nothing is left unknown.
///
/// Falls back to the first unknown cell when no ship of `lengths` fits
/// anywhere, so the choice is always a legal move.
pub fn choose_target<R: Rng + ?Sized>(
    cells: &[CellStatus; CELL_COUNT],
    lengths: &[usize],
    rng: &mut R,
) -> Option<usize> {
    let pdf = calc_pdf(cells, lengths);
    sample_pdf(&pdf, TEMPERATURE, rng)
        .or_else(|| cells.iter().position(|&c| c == CellStatus::Unknown))
}
