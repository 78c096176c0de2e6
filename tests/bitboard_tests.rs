use battleship_arena::{BitBoard, BitBoardError, BB};

#[test]
fn test_try_new_sizes() {
    // Success for board that fits
    let ok = BitBoard::<u128, 10>::try_new();
    assert!(ok.is_ok());

    // Failure when board is too large
    let err = BitBoard::<u64, 10>::try_new();
    assert!(matches!(err, Err(BitBoardError::SizeTooLarge { .. })));
}

#[test]
fn test_get_set_and_bounds() {
    let mut bb = BB::new();
    assert!(bb.is_empty());

    bb.set(1, 1).unwrap();
    assert!(bb.get(1, 1).unwrap());
    assert!(bb.contains(11));
    assert!(!bb.contains(12));

    assert_eq!(
        bb.set(10, 0).unwrap_err(),
        BitBoardError::IndexOutOfBounds { row: 10, col: 0 }
    );
    assert!(!bb.contains(100));
    assert!(!bb.contains(1_000));
}

#[test]
fn test_from_cells_and_indices() {
    let bb = BB::from_cells([(0, 1), (9, 9), (4, 2)]).unwrap();
    let idx: Vec<_> = bb.indices().collect();
    assert_eq!(idx, vec![1, 42, 99]);
    assert_eq!(bb.count_ones(), 3);
}

#[test]
fn test_and_or() {
    let a = BB::from_cells([(0, 0), (0, 1)]).unwrap();
    let b = BB::from_cells([(0, 1), (0, 2)]).unwrap();
    assert_eq!((a & b).indices().collect::<Vec<_>>(), vec![1]);
    let mut c = a;
    c |= b;
    assert_eq!(c.count_ones(), 3);
}

#[test]
fn test_insert_by_index() {
    let mut bb = BB::new();
    assert!(bb.insert(57));
    assert!(bb.contains(57));
    assert!(bb.get(5, 7).unwrap());
    assert!(!bb.insert(100));
    assert_eq!(bb.count_ones(), 1);
}
