use std::path::PathBuf;

use rand::Rng as _;
use tritris_training::Episode;

use crate::util::{self, Output};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Path to the model file (JSON format)
    #[arg(long)]
    model: PathBuf,
    /// Number of greedy episodes to play
    #[arg(long, default_value_t = 1)]
    episodes: usize,
    /// Random seed for the piece sequence
    #[arg(long)]
    seed: Option<u64>,
    /// Write the played episodes to this file as JSON
    #[arg(long)]
    record: Option<PathBuf>,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let model = util::read_model_file(&arg.model)?;
    eprintln!(
        "Loaded model {} (trained at {}, {} weights)",
        model.name,
        model.trained_at,
        model.weights.len()
    );

    let seed = arg.seed.unwrap_or_else(|| rand::rng().random());
    let mut trainer = model.into_trainer(seed)?;

    let episodes = (0..arg.episodes)
        .map(|i| {
            let episode = trainer.greedy_episode();
            print_episode(i, &episode);
            episode
        })
        .collect::<Vec<_>>();

    if let Some(path) = &arg.record {
        Output::save_json(&episodes, Some(path.as_path()))?;
        eprintln!("Recorded {} episodes to {}", episodes.len(), path.display());
    }

    Ok(())
}

pub(crate) fn print_episode(index: usize, episode: &Episode) {
    eprintln!();
    eprintln!("Episode #{index}:");
    for (step, state) in episode.states.iter().enumerate() {
        if step > 0 {
            let moves = episode.moves[step - 1]
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>();
            eprintln!("Step {step}: {}", moves.join(" "));
        }
        eprintln!("{state}");
        eprintln!();
    }
    let stats = &episode.stats;
    eprintln!(
        "  {} steps, {} pieces placed, {} lines cleared, reward {:.2}{}",
        stats.steps,
        stats.placed_pieces,
        stats.cleared_lines,
        stats.total_reward,
        if stats.game_over { ", game over" } else { "" },
    );
}
