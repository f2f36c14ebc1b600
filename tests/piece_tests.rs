//! Piece tests - shape table, rotation and kick lists

use falling_blocks::core::pieces::{color_of, get_shape, kick_offsets};
use falling_blocks::core::Piece;
use falling_blocks::types::{Color, PieceKind, I_KICKS, STANDARD_KICKS};

#[test]
fn test_i_piece_shapes() {
    assert_eq!(get_shape(PieceKind::I, 0).cells().as_slice(), &[(0, 1), (1, 1), (2, 1), (3, 1)]);
    assert_eq!(get_shape(PieceKind::I, 1).cells().as_slice(), &[(2, 0), (2, 1), (2, 2), (2, 3)]);
    assert_eq!(get_shape(PieceKind::I, 2).cells().as_slice(), &[(0, 2), (1, 2), (2, 2), (3, 2)]);
    assert_eq!(get_shape(PieceKind::I, 3).cells().as_slice(), &[(1, 0), (1, 1), (1, 2), (1, 3)]);
}

#[test]
fn test_o_piece_is_rotation_invariant() {
    let north = get_shape(PieceKind::O, 0);
    assert_eq!(north.size(), 2);
    assert_eq!(north.cells().as_slice(), &[(0, 0), (1, 0), (0, 1), (1, 1)]);
    for rotation in 1..4 {
        assert_eq!(get_shape(PieceKind::O, rotation), north);
    }
}

#[test]
fn test_t_piece_shapes() {
    assert_eq!(get_shape(PieceKind::T, 0).cells().as_slice(), &[(1, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(get_shape(PieceKind::T, 1).cells().as_slice(), &[(1, 0), (1, 1), (2, 1), (1, 2)]);
    assert_eq!(get_shape(PieceKind::T, 2).cells().as_slice(), &[(0, 1), (1, 1), (2, 1), (1, 2)]);
    assert_eq!(get_shape(PieceKind::T, 3).cells().as_slice(), &[(1, 0), (0, 1), (1, 1), (1, 2)]);
}

#[test]
fn test_s_z_j_l_spawn_shapes() {
    assert_eq!(get_shape(PieceKind::S, 0).cells().as_slice(), &[(1, 0), (2, 0), (0, 1), (1, 1)]);
    assert_eq!(get_shape(PieceKind::Z, 0).cells().as_slice(), &[(0, 0), (1, 0), (1, 1), (2, 1)]);
    assert_eq!(get_shape(PieceKind::J, 0).cells().as_slice(), &[(0, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(get_shape(PieceKind::L, 0).cells().as_slice(), &[(2, 0), (0, 1), (1, 1), (2, 1)]);
}

#[test]
fn test_every_rotation_has_four_cells() {
    for kind in PieceKind::ALL {
        for rotation in 0..4 {
            assert_eq!(get_shape(kind, rotation).cells().len(), 4, "{kind} r{rotation}");
        }
    }
}

#[test]
fn test_four_rotations_return_to_start() {
    for kind in PieceKind::ALL {
        let start = Piece::new(kind);
        let mut piece = start;
        for _ in 0..4 {
            piece.rotate_cw();
        }
        assert_eq!(piece, start);
        assert_eq!(piece.shape(), start.shape());
    }
}

#[test]
fn test_rotate_ccw_undoes_rotate_cw() {
    let mut piece = Piece::new(PieceKind::L);
    piece.rotate_cw();
    assert_eq!(piece.rotation(), 1);
    piece.rotate_ccw();
    assert_eq!(piece.rotation(), 0);
    piece.rotate_ccw();
    assert_eq!(piece.rotation(), 3);
}

#[test]
fn test_copy_is_independent() {
    let original = Piece::new(PieceKind::S);
    let mut copy = original;
    copy.rotate_cw();
    copy.set_position(4, 7);

    assert_eq!(original.rotation(), 0);
    assert_eq!(original.position(), (0, 0));
    assert_eq!(copy.kind(), PieceKind::S);
}

#[test]
fn test_colors() {
    assert_eq!(color_of(PieceKind::I), Color::from_hex(0x00f0f0));
    assert_eq!(color_of(PieceKind::O), Color::from_hex(0xf0f000));
    assert_eq!(color_of(PieceKind::T), Color::from_hex(0xa000f0));
    assert_eq!(color_of(PieceKind::S), Color::from_hex(0x00f000));
    assert_eq!(color_of(PieceKind::Z), Color::from_hex(0xf00000));
    assert_eq!(color_of(PieceKind::J), Color::from_hex(0x0000f0));
    assert_eq!(color_of(PieceKind::L), Color::from_hex(0xf0a000));
    assert_eq!(Piece::new(PieceKind::T).color().to_string(), "#a000f0");
}

#[test]
fn test_kick_lists() {
    assert_eq!(kick_offsets(PieceKind::I), &I_KICKS[..]);
    for kind in [PieceKind::O, PieceKind::T, PieceKind::S, PieceKind::Z, PieceKind::J, PieceKind::L] {
        assert_eq!(kick_offsets(kind), &STANDARD_KICKS[..]);
    }
}

#[test]
fn test_from_tag() {
    assert_eq!(Piece::from_tag("t").unwrap().kind(), PieceKind::T);
    assert_eq!(Piece::from_tag("J").unwrap().kind(), PieceKind::J);

    let err = Piece::from_tag("Q").unwrap_err();
    assert_eq!(err.tag(), "Q");
    assert!(Piece::from_tag("").is_err());
    assert!(Piece::from_tag("II").is_err());
}
