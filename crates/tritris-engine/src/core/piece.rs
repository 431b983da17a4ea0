use rand::{Rng, distr::StandardUniform, prelude::Distribution};
use serde::{Deserialize, Serialize};

/// A tritris piece with its kind and pivot position.
///
/// Pieces are immutable - movement operations return new `Piece` instances.
/// Moving a piece never checks the board; use
/// [`Board::is_colliding`](super::board::Board::is_colliding) to validate the result.
///
/// # Example
///
/// ```
/// use tritris_engine::{Piece, PieceKind};
///
/// let piece = Piece::new(PieceKind::ElbowUpRight);
/// let moved = piece.left().down();
/// assert_eq!(moved.position().col(), piece.position().col() - 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Piece {
    kind: PieceKind,
    position: PiecePosition,
}

impl Piece {
    /// Creates a piece of the given kind at the spawn position.
    #[must_use]
    pub const fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            position: PiecePosition::SPAWN_POSITION,
        }
    }

    #[must_use]
    pub const fn with_position(self, position: PiecePosition) -> Self {
        Self {
            kind: self.kind,
            position,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub const fn position(&self) -> PiecePosition {
        self.position
    }

    /// Absolute `(row, col)` of the three cells covered by the piece.
    #[must_use]
    pub fn occupied_positions(&self) -> [(i8, i8); 3] {
        self.kind
            .offsets()
            .map(|(dr, dc)| (self.position.row + dr, self.position.col + dc))
    }

    #[must_use]
    pub const fn left(&self) -> Self {
        self.with_position(self.position.shifted(0, -1))
    }

    #[must_use]
    pub const fn right(&self) -> Self {
        self.with_position(self.position.shifted(0, 1))
    }

    #[must_use]
    pub const fn down(&self) -> Self {
        self.with_position(self.position.shifted(-1, 0))
    }
}

/// Pivot position of a piece.
///
/// Row 0 is the bottom of the board and columns grow to the right. Coordinates
/// are signed so that a piece shifted past a wall or the floor can still be
/// represented (and rejected by collision detection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PiecePosition {
    row: i8,
    col: i8,
}

impl PiecePosition {
    pub const SPAWN_POSITION: Self = Self::new(4, 2);

    #[must_use]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn row(self) -> i8 {
        self.row
    }

    #[must_use]
    pub const fn col(self) -> i8 {
        self.col
    }

    #[must_use]
    pub const fn shifted(self, d_row: i8, d_col: i8) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }
}

/// Enum representing the type of piece.
///
/// Elbow pieces are named after the direction of their two arms as seen from
/// the bend, which is also the pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum PieceKind {
    /// Three cells stacked in one column, pivot in the middle.
    VerticalLine = 0,
    /// Three cells side by side in one row, pivot in the middle.
    HorizontalLine = 1,
    /// Arms pointing up and right.
    ElbowUpRight = 2,
    /// Arms pointing up and left.
    ElbowUpLeft = 3,
    /// Arms pointing down and left.
    ElbowDownLeft = 4,
    /// Arms pointing down and right.
    ElbowDownRight = 5,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece types (6).
    pub const LEN: usize = 6;

    pub const ALL: [Self; Self::LEN] = [
        PieceKind::VerticalLine,
        PieceKind::HorizontalLine,
        PieceKind::ElbowUpRight,
        PieceKind::ElbowUpLeft,
        PieceKind::ElbowDownLeft,
        PieceKind::ElbowDownRight,
    ];

    /// Index of this kind in [`Self::ALL`], used for one-hot encodings.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Relative `(row, col)` offsets of the three cells from the pivot.
    #[must_use]
    pub const fn offsets(self) -> [(i8, i8); 3] {
        PIECE_OFFSETS[self as usize]
    }
}

const PIECE_OFFSETS: [[(i8, i8); 3]; PieceKind::LEN] = [
    // VerticalLine
    [(-1, 0), (0, 0), (1, 0)],
    // HorizontalLine
    [(0, -1), (0, 0), (0, 1)],
    // ElbowUpRight
    [(0, 0), (0, 1), (1, 0)],
    // ElbowUpLeft
    [(0, -1), (0, 0), (1, 0)],
    // ElbowDownLeft
    [(-1, 0), (0, -1), (0, 0)],
    // ElbowDownRight
    [(-1, 0), (0, 0), (0, 1)],
];
