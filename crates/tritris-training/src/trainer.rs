use arrayvec::ArrayVec;
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use tritris_engine::GameState;

use crate::{
    ActionSet, ConfigError, Episode, EpisodeStats, Move, TrainerConfig, TrainingProgress,
    TrainingSummary, Transition, Weights, apply_move,
};

/// Value assigned to terminal states regardless of the weights.
pub const TERMINAL_VALUE: f64 = -10.0;

type Candidates = ArrayVec<(Move, Transition), { ActionSet::MAX_MOVES }>;

#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum TrainingError {
    #[display("weights became NaN or infinite during episode {episode}")]
    Diverged { episode: usize },
}

/// Linear Q-learning agent.
///
/// The trainer owns the weight vector and the random number generator used for
/// both piece spawns and exploration, so a trainer built with
/// [`Trainer::with_seed`] replays the same training run exactly.
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainerConfig,
    weights: Weights,
    rng: Pcg32,
}

impl Trainer {
    /// Creates a trainer with zero weights, seeded from the thread-local RNG.
    pub fn new(config: TrainerConfig) -> Result<Self, ConfigError> {
        Self::with_seed(config, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic training.
    pub fn with_seed(config: TrainerConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_weights(config, Weights::zeros(config.weight_len()), seed)
    }

    /// Creates a trainer starting from previously learned weights.
    pub fn with_weights(
        config: TrainerConfig,
        weights: Weights,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if weights.len() != config.weight_len() {
            return Err(ConfigError::WeightDimensionMismatch {
                expected: config.weight_len(),
                actual: weights.len(),
            });
        }
        if !weights.is_finite() {
            return Err(ConfigError::NonFiniteWeights);
        }
        Ok(Self {
            config,
            weights,
            rng: Pcg32::seed_from_u64(seed),
        })
    }

    #[must_use]
    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    #[must_use]
    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    #[must_use]
    pub fn into_weights(self) -> Weights {
        self.weights
    }

    /// Estimated value of a state.
    ///
    /// Terminal states are worth [`TERMINAL_VALUE`]; any other state is the dot
    /// product of its feature vector and the weights.
    #[must_use]
    pub fn eval(&self, state: &GameState) -> f64 {
        if state.is_terminal() {
            return TERMINAL_VALUE;
        }
        self.weights
            .dot(&state.feature_vector(self.config.feature_layout))
    }

    /// Bootstrapped TD target of a transition.
    ///
    /// Zero if the transition ended the game, otherwise its reward plus the
    /// discounted best value reachable with one more move.
    pub fn td_target(&mut self, transition: &Transition) -> f64 {
        if transition.next.is_terminal() {
            return 0.0;
        }
        let best_next = self
            .successors(&transition.next)
            .iter()
            .map(|(_, t)| self.eval(&t.next))
            .fold(f64::NEG_INFINITY, f64::max);
        transition.reward + self.config.gamma * best_next
    }

    /// Performs one TD update of the weights for the move taken in `state` and
    /// returns the TD error.
    ///
    /// Every weight `w[i]` moves by `alpha * (target - eval(state)) * x[i]`, where
    /// `x` is the feature vector of `state`.
    pub fn update(&mut self, state: &GameState, transition: &Transition) -> f64 {
        let target = self.td_target(transition);
        let td_error = target - self.eval(state);
        let features = state.feature_vector(self.config.feature_layout);
        self.weights
            .add_scaled(self.config.alpha * td_error, &features);
        td_error
    }

    /// Picks a move with an epsilon-greedy policy and returns it with its transition.
    ///
    /// With probability `epsilon` the move is uniformly random; otherwise it is the
    /// move whose successor has the highest [`eval`](Self::eval), earliest move first
    /// on ties.
    fn select_move(&mut self, state: &GameState, epsilon: f64) -> (Move, Transition) {
        debug_assert!((0.0..=1.0).contains(&epsilon));
        let moves = self.config.action_set.moves();
        if epsilon > 0.0 && self.rng.random_bool(epsilon) {
            let mv = moves[self.rng.random_range(0..moves.len())];
            return (mv, apply_move(state, mv, &mut self.rng));
        }

        let candidates = self.successors(state);
        let mut best = candidates[0];
        let mut best_value = self.eval(&best.1.next);
        for &(mv, transition) in &candidates[1..] {
            let value = self.eval(&transition.next);
            if value > best_value {
                best = (mv, transition);
                best_value = value;
            }
        }
        best
    }

    /// Plays one training episode from an empty board, updating the weights at every step.
    pub fn train_episode(&mut self) -> EpisodeStats {
        let mut state = GameState::new(&mut self.rng);
        let mut stats = EpisodeStats::default();
        for _ in 0..self.config.max_game_len {
            let (_, transition) = self.select_move(&state, self.config.epsilon);
            self.update(&state, &transition);
            stats.record_step(&transition);
            if transition.next.is_terminal() {
                break;
            }
            state = transition.next;
        }
        stats
    }

    /// Runs `episodes` independent training episodes.
    ///
    /// Returns a summary of all episodes, or `None` if `episodes` is zero.
    /// Training stops with [`TrainingError::Diverged`] as soon as a weight stops
    /// being finite.
    pub fn train(&mut self, episodes: usize) -> Result<Option<TrainingSummary>, TrainingError> {
        self.train_with_progress(episodes, |_| {})
    }

    /// Like [`Self::train`], calling `on_progress` each time another percent of the
    /// episodes has completed.
    pub fn train_with_progress<F>(
        &mut self,
        episodes: usize,
        mut on_progress: F,
    ) -> Result<Option<TrainingSummary>, TrainingError>
    where
        F: FnMut(&TrainingProgress),
    {
        let mut all = Vec::with_capacity(episodes);
        let mut chunk_start = 0;
        let mut reported_percent = 0;
        for completed in 1..=episodes {
            all.push(self.train_episode());
            if !self.weights.is_finite() {
                return Err(TrainingError::Diverged { episode: completed });
            }

            let percent = completed * 100 / episodes;
            if percent > reported_percent || completed == episodes {
                reported_percent = percent;
                if let Some(recent) = TrainingSummary::new(&all[chunk_start..]) {
                    on_progress(&TrainingProgress {
                        completed,
                        total: episodes,
                        recent,
                    });
                }
                chunk_start = completed;
            }
        }
        Ok(TrainingSummary::new(&all))
    }

    /// Plays one greedy episode (no exploration, no weight updates).
    pub fn greedy_episode(&mut self) -> Episode {
        let mut state = GameState::new(&mut self.rng);
        let mut episode = Episode {
            states: vec![state],
            moves: vec![],
            stats: EpisodeStats::default(),
        };
        for _ in 0..self.config.max_game_len {
            let (mv, transition) = self.select_move(&state, 0.0);
            episode.stats.record_step(&transition);
            episode.states.push(transition.next);
            episode.moves.push(mv.to_vec());
            if transition.next.is_terminal() {
                break;
            }
            state = transition.next;
        }
        episode
    }

    fn successors(&mut self, state: &GameState) -> Candidates {
        self.config
            .action_set
            .moves()
            .iter()
            .map(|&mv| (mv, apply_move(state, mv, &mut self.rng)))
            .collect()
    }
}
