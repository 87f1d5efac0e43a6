//! Board tests - grid storage, collision and line clearing

use blockfall::core::{shape, Board};
use blockfall::types::{Color, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const RED: Color = Color(0xFF0000);
const BLUE: Color = Color(0x0000FF);

fn fill_row(board: &mut Board, y: i32, color: Color) {
    for x in 0..BOARD_WIDTH as i32 {
        board.set(x, y, Some(color));
    }
}

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);
    assert_eq!(board.cells().len(), 200);

    for y in 0..BOARD_HEIGHT as i32 {
        for x in 0..BOARD_WIDTH as i32 {
            assert_eq!(board.get(x, y), Some(None), "cell ({}, {})", x, y);
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();
    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i32, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i32), None);
}

#[test]
fn test_board_set_and_get() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Some(RED)));
    assert_eq!(board.get(5, 10), Some(Some(RED)));
    assert!(board.is_occupied(5, 10));

    assert!(board.set(5, 10, None));
    assert_eq!(board.get(5, 10), Some(None));
    assert!(!board.is_occupied(5, 10));
}

#[test]
fn test_board_set_out_of_bounds() {
    let mut board = Board::new();
    assert!(!board.set(-1, 0, Some(RED)));
    assert!(!board.set(0, -1, Some(RED)));
    assert!(!board.set(BOARD_WIDTH as i32, 0, Some(RED)));
    assert!(!board.set(0, BOARD_HEIGHT as i32, Some(RED)));
    assert!(board.cells().iter().all(|c| c.is_none()));
}

#[test]
fn test_fits_rejects_walls_floor_and_overlap() {
    let mut board = Board::new();
    let t = shape(PieceKind::T).instantiate();

    assert!(board.fits(&t, 0, 0));
    assert!(board.fits(&t, 7, 18));
    assert!(!board.fits(&t, -1, 0));
    assert!(!board.fits(&t, 8, 0));
    assert!(!board.fits(&t, 0, 19));

    // Spawn partly above the top is legal.
    assert!(board.fits(&t, 3, -1));
    assert!(board.fits(&t, 3, -5));

    board.set(4, 11, Some(BLUE));
    assert!(!board.fits(&t, 3, 10));
    assert!(board.fits(&t, 5, 10));
}

#[test]
fn test_fits_ignores_locked_cells_under_empty_matrix_slots() {
    let mut board = Board::new();
    // T spawn matrix is .#. / ###: the top corners are empty.
    board.set(3, 5, Some(RED));
    board.set(5, 5, Some(RED));
    let t = shape(PieceKind::T).instantiate();
    assert!(board.fits(&t, 3, 5));
}

#[test]
fn test_board_is_row_full() {
    let mut board = Board::new();
    assert!(!board.is_row_full(5));

    fill_row(&mut board, 5, RED);
    assert!(board.is_row_full(5));

    for x in 0..BOARD_WIDTH as i32 - 1 {
        board.set(x, 6, Some(BLUE));
    }
    assert!(!board.is_row_full(6));
    assert!(!board.is_row_full(BOARD_HEIGHT as usize));
}

#[test]
fn test_clear_full_rows_shifts_rows_down() {
    let mut board = Board::new();
    fill_row(&mut board, 18, RED);
    fill_row(&mut board, 19, BLUE);
    board.set(0, 17, Some(RED));
    board.set(9, 16, Some(BLUE));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[19, 18]);

    assert_eq!(board.get(0, 19), Some(Some(RED)));
    assert_eq!(board.get(9, 18), Some(Some(BLUE)));
    assert_eq!(board.get(0, 17), Some(None));
    assert_eq!(
        board.cells().iter().filter(|c| c.is_some()).count(),
        2
    );
}

#[test]
fn test_clear_non_adjacent_rows_preserves_order() {
    let mut board = Board::new();
    fill_row(&mut board, 19, RED);
    fill_row(&mut board, 17, RED);
    // Survivors with distinct markers.
    board.set(1, 18, Some(BLUE));
    board.set(2, 16, Some(RED));
    board.set(3, 15, Some(BLUE));

    let cleared = board.clear_full_rows();
    assert_eq!(cleared.as_slice(), &[19, 17]);

    // Row 18 drops by one, rows above 17 drop by two.
    assert_eq!(board.get(1, 19), Some(Some(BLUE)));
    assert_eq!(board.get(2, 18), Some(Some(RED)));
    assert_eq!(board.get(3, 17), Some(Some(BLUE)));
    assert!((0..17).all(|y| !board.is_row_full(y)));
    assert_eq!(board.cells().iter().filter(|c| c.is_some()).count(), 3);
}

#[test]
fn test_clear_with_no_full_rows_is_noop() {
    let mut board = Board::new();
    board.set(4, 19, Some(RED));
    let before = board.clone();

    assert!(board.clear_full_rows().is_empty());
    assert_eq!(board, before);
}

#[test]
fn test_lock_cells_writes_color() {
    let mut board = Board::new();
    let o = shape(PieceKind::O).instantiate();

    assert_eq!(board.lock_cells(&o, 3, 5, PieceKind::O.color()), 4);
    for (x, y) in [(3, 5), (4, 5), (3, 6), (4, 6)] {
        assert_eq!(board.get(x, y), Some(Some(PieceKind::O.color())));
    }
}

#[test]
fn test_board_clear() {
    let mut board = Board::new();
    fill_row(&mut board, 0, RED);
    board.clear();
    assert_eq!(board, Board::default());
}
