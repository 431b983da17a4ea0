use serde::{Deserialize, Serialize};
use tritris_engine::{Action, GameState};

use crate::Transition;

/// Statistics of a single episode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct EpisodeStats {
    /// Number of moves taken.
    pub steps: usize,
    /// Number of pieces locked onto the board.
    pub placed_pieces: usize,
    /// Total number of rows cleared.
    pub cleared_lines: usize,
    /// Sum of the rewards of every transition.
    pub total_reward: f64,
    /// Whether the episode ended in a terminal state rather than at the step cap.
    pub game_over: bool,
}

impl EpisodeStats {
    /// Accounts for one move.
    pub fn record_step(&mut self, transition: &Transition) {
        self.steps += 1;
        self.total_reward += transition.reward;
        self.placed_pieces += transition.placed_pieces;
        self.cleared_lines += transition.cleared_lines;
        self.game_over = transition.next.is_terminal();
    }
}

/// Record of a played episode.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Episode {
    /// Every visited state, starting with the initial one.
    pub states: Vec<GameState>,
    /// Moves taken; `moves[i]` leads from `states[i]` to `states[i + 1]`.
    pub moves: Vec<Vec<Action>>,
    pub stats: EpisodeStats,
}

/// Summary of a batch of episodes.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct TrainingSummary {
    pub episodes: usize,
    pub min_steps: usize,
    pub max_steps: usize,
    pub mean_steps: f64,
    pub std_dev_steps: f64,
    pub mean_cleared_lines: f64,
    pub mean_reward: f64,
    /// Fraction of episodes that ended in a terminal state.
    pub game_over_rate: f64,
}

impl TrainingSummary {
    /// Summarizes a batch of episode statistics.
    ///
    /// Returns `None` if the batch is empty.
    #[must_use]
    pub fn new(stats: &[EpisodeStats]) -> Option<Self> {
        let min_steps = stats.iter().map(|s| s.steps).min()?;
        let max_steps = stats.iter().map(|s| s.steps).max()?;

        #[expect(clippy::cast_precision_loss)]
        let mean = |f: fn(&EpisodeStats) -> f64| {
            stats.iter().map(f).sum::<f64>() / stats.len() as f64
        };
        #[expect(clippy::cast_precision_loss)]
        let mean_steps = mean(|s| s.steps as f64);
        #[expect(clippy::cast_precision_loss)]
        let steps_sq = mean(|s| (s.steps as f64).powi(2));
        let variance = (steps_sq - mean_steps.powi(2)).max(0.0);
        #[expect(clippy::cast_precision_loss)]
        let mean_cleared_lines = mean(|s| s.cleared_lines as f64);

        Some(Self {
            episodes: stats.len(),
            min_steps,
            max_steps,
            mean_steps,
            std_dev_steps: variance.sqrt(),
            mean_cleared_lines,
            mean_reward: mean(|s| s.total_reward),
            game_over_rate: mean(|s| if s.game_over { 1.0 } else { 0.0 }),
        })
    }
}

/// Progress report passed to the callback of
/// [`Trainer::train_with_progress`](crate::Trainer::train_with_progress).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingProgress {
    /// Episodes completed so far.
    pub completed: usize,
    /// Episodes requested in total.
    pub total: usize,
    /// Summary of the episodes completed since the previous report.
    pub recent: TrainingSummary,
}

impl TrainingProgress {
    /// Completed share of the run, in percent.
    #[must_use]
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            100
        } else {
            self.completed * 100 / self.total
        }
    }
}
