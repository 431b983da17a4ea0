use serde::{Deserialize, Serialize};

use crate::{PieceKind, SIZE};

use super::GameState;

/// Layout of the feature vector extracted from a [`GameState`].
///
/// Every layout starts with one occupancy entry per board cell (`1.0` if
/// occupied, in `row * COLS + col` order), followed by a one-hot block for the
/// falling piece's kind.
///
/// | Layout                  | Extra entries                  | Length |
/// |-------------------------|--------------------------------|--------|
/// | `Occupancy`             | none                           | 30     |
/// | `OccupancyWithPosition` | pivot row, pivot column        | 32     |
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FeatureLayout {
    #[default]
    Occupancy,
    OccupancyWithPosition,
}

const PIECE_OFFSET: usize = SIZE;
const POSITION_OFFSET: usize = SIZE + PieceKind::LEN;

impl FeatureLayout {
    /// Number of entries in vectors of this layout.
    #[must_use]
    pub const fn dimension(self) -> usize {
        match self {
            Self::Occupancy => POSITION_OFFSET,
            Self::OccupancyWithPosition => POSITION_OFFSET + 2,
        }
    }

    /// Extracts the feature vector of `state`.
    #[must_use]
    pub fn extract(self, state: &GameState) -> Vec<f64> {
        let mut features = vec![0.0; self.dimension()];

        for (x, occupied) in features.iter_mut().zip(state.board().cells()) {
            *x = if occupied { 1.0 } else { 0.0 };
        }

        let piece = state.falling_piece();
        features[PIECE_OFFSET + piece.kind().index()] = 1.0;

        if self == Self::OccupancyWithPosition {
            features[POSITION_OFFSET] = f64::from(piece.position().row());
            features[POSITION_OFFSET + 1] = f64::from(piece.position().col());
        }

        features
    }
}
