//! Pieces module - tetromino templates, orientation matrices and rotation
//!
//! Every kind is defined once as a boolean matrix in its spawn orientation.
//! Rotation is a pure 90° clockwise transpose of the current matrix; there is
//! no rotation-state index and no per-kind kick table. A rotation that does not
//! fit is retried with a fixed list of positional kicks.

use crate::types::{Color, PieceKind, BOARD_WIDTH};

/// Largest matrix side of any tetromino (the I piece is 1x4 / 4x1).
pub const MAX_DIM: usize = 4;

/// Kick offsets tried in order when rotating; (0, 0) is the plain rotation.
pub const KICK_OFFSETS: [(i32, i32); 6] = [(0, 0), (-1, 0), (1, 0), (0, -1), (-2, 0), (2, 0)];

/// Boolean occupancy matrix of a piece in one orientation.
///
/// Stored inline in a fixed 4x4 grid; cells outside `rows x cols` are always
/// empty, so two orientations compare equal exactly when their visible
/// matrices are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation {
    rows: u8,
    cols: u8,
    cells: [[bool; MAX_DIM]; MAX_DIM],
}

impl Orientation {
    /// Build an orientation from a row-major 0/1 matrix.
    pub const fn from_matrix<const R: usize, const C: usize>(src: [[u8; C]; R]) -> Self {
        assert!(R <= MAX_DIM && C <= MAX_DIM);
        let mut cells = [[false; MAX_DIM]; MAX_DIM];
        let mut r = 0;
        while r < R {
            let mut c = 0;
            while c < C {
                cells[r][c] = src[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self {
            rows: R as u8,
            cols: C as u8,
            cells,
        }
    }

    /// Matrix height
    pub fn rows(&self) -> usize {
        self.rows as usize
    }

    /// Matrix width
    pub fn cols(&self) -> usize {
        self.cols as usize
    }

    /// Whether the cell at (row, col) is occupied; false outside the matrix.
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows() && col < self.cols() && self.cells[row][col]
    }

    /// Offsets `(col, row)` of every occupied cell, row-major.
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32)> {
        let m = *self;
        (0..m.rows()).flat_map(move |row| {
            (0..m.cols()).filter_map(move |col| m.cells[row][col].then_some((col as i32, row as i32)))
        })
    }

    /// Rotate 90° clockwise.
    ///
    /// An `h x w` matrix becomes `w x h`; source cell `(row, col)` moves to
    /// `(col, h - 1 - row)`. The receiver is left untouched.
    pub fn rotated_cw(&self) -> Self {
        let h = self.rows();
        let w = self.cols();
        let mut cells = [[false; MAX_DIM]; MAX_DIM];
        for row in 0..h {
            for col in 0..w {
                cells[col][h - 1 - row] = self.cells[row][col];
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }
}

/// Immutable template of a tetromino kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceShape {
    pub kind: PieceKind,
    pub color: Color,
    matrix: Orientation,
}

impl PieceShape {
    /// Spawn orientation as a fresh value the caller owns and may rotate.
    pub fn instantiate(&self) -> Orientation {
        self.matrix
    }
}

const I_SHAPE: Orientation = Orientation::from_matrix([[1, 1, 1, 1]]);
const O_SHAPE: Orientation = Orientation::from_matrix([[1, 1], [1, 1]]);
const T_SHAPE: Orientation = Orientation::from_matrix([[0, 1, 0], [1, 1, 1]]);
const S_SHAPE: Orientation = Orientation::from_matrix([[0, 1, 1], [1, 1, 0]]);
const Z_SHAPE: Orientation = Orientation::from_matrix([[1, 1, 0], [0, 1, 1]]);
const J_SHAPE: Orientation = Orientation::from_matrix([[1, 0, 0], [1, 1, 1]]);
const L_SHAPE: Orientation = Orientation::from_matrix([[0, 0, 1], [1, 1, 1]]);

/// Get the template for a piece kind
pub fn shape(kind: PieceKind) -> PieceShape {
    let matrix = match kind {
        PieceKind::I => I_SHAPE,
        PieceKind::O => O_SHAPE,
        PieceKind::T => T_SHAPE,
        PieceKind::S => S_SHAPE,
        PieceKind::Z => Z_SHAPE,
        PieceKind::J => J_SHAPE,
        PieceKind::L => L_SHAPE,
    };
    PieceShape {
        kind,
        color: kind.color(),
        matrix,
    }
}

/// A piece instance on (or just above) the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub orientation: Orientation,
    pub x: i32,
    pub y: i32,
    pub color: Color,
}

impl ActivePiece {
    /// Create a piece in spawn orientation, horizontally centered on row 0
    pub fn spawn(kind: PieceKind) -> Self {
        let template = shape(kind);
        let orientation = template.instantiate();
        Self {
            kind,
            orientation,
            x: (BOARD_WIDTH / 2) as i32 - (orientation.cols() / 2) as i32,
            y: 0,
            color: template.color,
        }
    }

    /// Absolute board coordinates `(x, y)` of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> {
        let (x, y) = (self.x, self.y);
        self.orientation
            .occupied()
            .map(move |(dx, dy)| (x + dx, y + dy))
    }
}

/// Try to rotate an orientation clockwise with wall kicks
///
/// `fits(candidate, dx, dy)` reports whether the rotated matrix fits at the
/// current origin shifted by the kick. Returns the rotated matrix and the first
/// kick that fits, or None if every kick fails.
pub fn try_rotate(
    orientation: &Orientation,
    mut fits: impl FnMut(&Orientation, i32, i32) -> bool,
) -> Option<(Orientation, (i32, i32))> {
    let rotated = orientation.rotated_cw();
    KICK_OFFSETS
        .iter()
        .copied()
        .find(|&(dx, dy)| fits(&rotated, dx, dy))
        .map(|kick| (rotated, kick))
}
