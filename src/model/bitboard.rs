//! Fixed-size occupancy masks over the grid.
//!
//! A `BitBoard<T, N>` packs an `N×N` grid into the unsigned integer `T`,
//! one bit per cell in row-major order, so bit `i` is the cell with board
//! index `i`. Ship masks and the fleet occupancy map are built from it.

use core::ops::{BitAnd, BitOr, BitOrAssign};
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};

/// Errors returned by bitboard operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitBoardError {
    /// `N*N` does not fit in the bits of `T`.
    SizeTooLarge { n: usize, capacity: usize },
    /// Row or column outside `[0, N)`.
    IndexOutOfBounds { row: usize, col: usize },
}

impl fmt::Display for BitBoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitBoardError::SizeTooLarge { n, capacity } => {
                write!(f, "board of {}x{} cells exceeds {} bits", n, n, capacity)
            }
            BitBoardError::IndexOutOfBounds { row, col } => {
                write!(f, "cell (row {}, col {}) is off the board", row, col)
            }
        }
    }
}

/// An `N×N` occupancy mask stored in `T`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitBoard<T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    bits: T,
}

impl<T, const N: usize> BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    const CELLS: usize = N * N;

    #[inline]
    fn mask() -> T {
        if Self::CELLS == mem::size_of::<T>() * 8 {
            !T::zero()
        } else {
            (T::one() << Self::CELLS) - T::one()
        }
    }

    /// Empty board.
    #[inline]
    pub fn new() -> Self {
        BitBoard { bits: T::zero() }
    }

    /// Empty board, or `SizeTooLarge` when `N*N` does not fit in `T`.
    pub fn try_new() -> Result<Self, BitBoardError> {
        let capacity = mem::size_of::<T>() * 8;
        if Self::CELLS > capacity {
            Err(BitBoardError::SizeTooLarge { n: N, capacity })
        } else {
            Ok(Self::new())
        }
    }

    /// Number of occupied cells.
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_zero()
    }

    /// Whether the cell at (`row`, `col`) is set.
    pub fn get(&self, row: usize, col: usize) -> Result<bool, BitBoardError> {
        self.check_bounds(row, col)?;
        Ok(self.contains(row * N + col))
    }

    /// Set the cell at (`row`, `col`).
    pub fn set(&mut self, row: usize, col: usize) -> Result<(), BitBoardError> {
        self.check_bounds(row, col)?;
        self.bits = self.bits | (T::one() << (row * N + col));
        Ok(())
    }

    /// Set the cell with row-major `index`. Returns `false`, leaving the
    /// board untouched, when `index` is past the board.
    #[inline]
    pub fn insert(&mut self, index: usize) -> bool {
        if index >= Self::CELLS {
            return false;
        }
        self.bits = self.bits | (T::one() << index);
        true
    }

    /// Whether the cell with row-major `index` is set. Indices past the
    /// board are never set.
    #[inline]
    pub fn contains(&self, index: usize) -> bool {
        index < Self::CELLS && ((self.bits >> index) & T::one()) != T::zero()
    }

    #[inline]
    fn check_bounds(&self, row: usize, col: usize) -> Result<(), BitBoardError> {
        if row >= N || col >= N {
            Err(BitBoardError::IndexOutOfBounds { row, col })
        } else {
            Ok(())
        }
    }

    /// Build a mask from an iterator over `(row, col)` positions.
    pub fn from_cells<I>(cells: I) -> Result<Self, BitBoardError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut board = Self::new();
        for (r, c) in cells {
            board.set(r, c)?;
        }
        Ok(board)
    }

    /// Row-major indices of the set cells, ascending.
    pub fn indices(&self) -> Indices<'_, T, N> {
        Indices { board: self, idx: 0 }
    }
}

impl<T, const N: usize> Default for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> fmt::Debug for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitBoard<{}>:", N)?;
        for r in 0..N {
            for c in 0..N {
                let bit = if self.contains(r * N + c) { '■' } else { '□' };
                write!(f, "{} ", bit)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Iterator over the set cells of a bitboard, as row-major indices.
#[derive(Clone, Copy)]
pub struct Indices<'a, T, const N: usize>
where
    T: PrimInt + Unsigned + Zero,
{
    board: &'a BitBoard<T, N>,
    idx: usize,
}

impl<'a, T, const N: usize> Iterator for Indices<'a, T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.idx < N * N {
            let idx = self.idx;
            self.idx += 1;
            if self.board.contains(idx) {
                return Some(idx);
            }
        }
        None
    }
}

impl<T, const N: usize> BitAnd for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        BitBoard {
            bits: self.bits & rhs.bits,
        }
    }
}

impl<T, const N: usize> BitOr for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        BitBoard {
            bits: (self.bits | rhs.bits) & Self::mask(),
        }
    }
}

impl<T, const N: usize> BitOrAssign for BitBoard<T, N>
where
    T: PrimInt + Unsigned + Zero,
{
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}
