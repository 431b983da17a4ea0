use serde::{Deserialize, Serialize};

/// Primitive action applied to the falling piece.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display,
)]
pub enum Action {
    /// Hard drop: fall until blocked, then lock.
    #[display("drop")]
    Drop,
    /// Shift one column left (if free), then apply gravity.
    #[display("left")]
    MoveLeft,
    /// Shift one column right (if free), then apply gravity.
    #[display("right")]
    MoveRight,
}

impl Action {
    pub const LEN: usize = 3;

    pub const ALL: [Self; Self::LEN] = [Action::Drop, Action::MoveLeft, Action::MoveRight];
}
