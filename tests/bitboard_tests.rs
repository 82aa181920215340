use salvo::{BitBoard, BitBoardError};

#[test]
fn test_try_new_sizes() {
    assert!(BitBoard::<u128, 10>::try_new().is_ok());
    assert!(BitBoard::<u128, 11>::try_new().is_ok());

    let err = BitBoard::<u128, 12>::try_new();
    assert!(matches!(err, Err(BitBoardError::SizeTooLarge { .. })));
}

#[test]
fn test_get_set_bounds() {
    let mut bb = BitBoard::<u16, 4>::new();
    assert!(bb.is_empty());

    bb.set(1, 1).unwrap();
    assert!(bb.get(1, 1).unwrap());
    assert!(!bb.get(2, 3).unwrap());

    assert_eq!(
        bb.set(4, 0),
        Err(BitBoardError::IndexOutOfBounds { row: 4, col: 0 })
    );
    assert!(bb.get(0, 4).is_err());
    assert!(!bb.contains(0, 4));
}

#[test]
fn test_halo_is_clipped_at_edges() {
    let mut bb = BitBoard::<u128, 10>::new();
    bb.set_with_halo(0, 0).unwrap();
    let bits: Vec<_> = bb.iter_set_bits().collect();
    assert_eq!(bits, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);

    bb.set_with_halo(5, 5).unwrap();
    assert_eq!(bb.count_ones(), 4 + 9);
}

#[test]
fn test_touches_covers_diagonals() {
    let mut bb = BitBoard::<u128, 10>::new();
    bb.set(4, 4).unwrap();
    for (r, c) in [(3, 3), (3, 5), (5, 3), (5, 5), (4, 3), (4, 4)] {
        assert!(bb.touches(r, c), "({}, {})", r, c);
    }
    assert!(!bb.touches(2, 4));
    assert!(!bb.touches(4, 6));
    assert!(!bb.touches(9, 9));
}

#[test]
fn test_raw_roundtrip_masks_upper_bits() {
    let bb = BitBoard::<u16, 3>::from_raw(u16::MAX);
    assert_eq!(bb.count_ones(), 9);
    assert_eq!((!bb).count_ones(), 0);
    assert_eq!(BitBoard::<u16, 3>::from_raw(bb.into_raw()), bb);
}
