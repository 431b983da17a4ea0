use std::path::PathBuf;

use anyhow::Context as _;
use tritris_engine::FeatureLayout;
use tritris_training::{ActionSet, Trainer, TrainerConfig, TrainingProgress};

use crate::{command::play, model::linear_model::LinearModel, util::Output};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum FeaturesArg {
    Occupancy,
    OccupancyWithPosition,
}

impl From<FeaturesArg> for FeatureLayout {
    fn from(arg: FeaturesArg) -> Self {
        match arg {
            FeaturesArg::Occupancy => Self::Occupancy,
            FeaturesArg::OccupancyWithPosition => Self::OccupancyWithPosition,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ActionsArg {
    Primitive,
    Macro,
}

impl From<ActionsArg> for ActionSet {
    fn from(arg: ActionsArg) -> Self {
        match arg {
            ActionsArg::Primitive => Self::Primitive,
            ActionsArg::Macro => Self::Macro,
        }
    }
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// Number of training episodes
    #[arg(long, default_value_t = 100_000)]
    iterations: usize,
    /// Learning rate, in (0, 0.01]
    #[arg(long, default_value_t = 0.001)]
    alpha: f64,
    /// Discount factor
    #[arg(long, default_value_t = 0.9)]
    gamma: f64,
    /// Exploration rate
    #[arg(long, default_value_t = 0.1)]
    epsilon: f64,
    /// Maximum number of moves per episode
    #[arg(long, default_value_t = 25)]
    max_game_len: usize,
    /// Feature vector layout
    #[arg(long, value_enum, default_value_t = FeaturesArg::Occupancy)]
    features: FeaturesArg,
    /// Moves available to the agent
    #[arg(long, value_enum, default_value_t = ActionsArg::Primitive)]
    actions: ActionsArg,
    /// Random seed for reproducible training
    #[arg(long)]
    seed: Option<u64>,
    /// Number of greedy episodes to print after training
    #[arg(long, default_value_t = 3)]
    show_episodes: usize,
    /// Model name stored in the output file
    #[arg(long, default_value = "linear-q")]
    name: String,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl TrainArg {
    pub(crate) fn trainer_config(&self) -> TrainerConfig {
        TrainerConfig {
            alpha: self.alpha,
            gamma: self.gamma,
            epsilon: self.epsilon,
            max_game_len: self.max_game_len,
            feature_layout: self.features.into(),
            action_set: self.actions.into(),
        }
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let config = arg.trainer_config();
    let mut trainer = match arg.seed {
        Some(seed) => Trainer::with_seed(config, seed)?,
        None => Trainer::new(config)?,
    };

    eprintln!("Training for {} episodes:", arg.iterations);
    eprintln!("  {config:?}");
    let summary = trainer
        .train_with_progress(arg.iterations, print_progress)
        .context("Training failed; no model was written (try a smaller --alpha)")?;

    eprintln!();
    match summary {
        Some(summary) => {
            eprintln!("Training completed.");
            eprintln!(
                "  Steps: mean {:.2}, std {:.2}, min {}, max {}",
                summary.mean_steps, summary.std_dev_steps, summary.min_steps, summary.max_steps
            );
            eprintln!("  Mean cleared lines: {:.3}", summary.mean_cleared_lines);
            eprintln!("  Game over rate:     {:.3}", summary.game_over_rate);
        }
        None => eprintln!("No episodes were run."),
    }

    for i in 0..arg.show_episodes {
        let episode = trainer.greedy_episode();
        play::print_episode(i, &episode);
    }

    eprintln!("Weights:");
    eprintln!("{}", trainer.weights());

    let config = *trainer.config();
    let model = LinearModel::new(arg.name.clone(), config, trainer.into_weights())?;
    Output::save_json(&model, arg.output.as_deref())?;

    eprintln!();
    eprintln!("Model saved successfully");
    if let Some(path) = &arg.output {
        eprintln!("  Path: {}", path.display());
    }
    eprintln!("  Name: {}", model.name);
    eprintln!("  Trained at: {}", model.trained_at);
    eprintln!("  Weights: {} entries", model.weights.len());

    Ok(())
}

fn print_progress(progress: &TrainingProgress) {
    let TrainingProgress {
        completed,
        total,
        recent,
    } = progress;
    // Only every 10th percent, or the final report.
    if progress.percent() % 10 != 0 && completed != total {
        return;
    }
    eprintln!(
        "  [{:3}%] {completed}/{total}: steps {:.2} (std {:.2}), lines {:.3}, game over {:.3}",
        progress.percent(),
        recent.mean_steps,
        recent.std_dev_steps,
        recent.mean_cleared_lines,
        recent.game_over_rate,
    );
}
