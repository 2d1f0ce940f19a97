use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn};
use rayon::prelude::*;

use seeded_2048::engine::{self as GameEngine, Board};
use seeded_2048::rollout::play_greedy;
use seeded_2048::trace;

#[derive(Parser, Debug)]
#[command(
    name = "seeded-2048",
    version,
    about = "Inspect and replay deterministic 2048 boards"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the seeded board and its four move outcomes
    Show {
        #[arg(short, long)]
        seed: u64,
    },
    /// Play a fixed-priority rollout from a seed
    Play {
        #[arg(short, long)]
        seed: u64,
        /// Stop after this many moves
        #[arg(long, value_name = "N")]
        max_steps: Option<usize>,
        /// Write the game as a trace file
        #[arg(short = 'o', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Parse a trace file and verify it replays to the recorded board
    Replay {
        #[arg(value_name = "FILE")]
        path: PathBuf,
    },
    /// Play rollouts for a range of seeds in parallel and report lengths
    Sweep {
        /// First seed (inclusive)
        #[arg(long)]
        from: u64,
        /// Last seed (exclusive)
        #[arg(long)]
        to: u64,
        /// Number of worker threads (defaults to Rayon default)
        #[arg(long, value_name = "N")]
        threads: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    GameEngine::warm();

    match cli.cmd {
        Command::Show { seed } => {
            let board = Board::from_seed(seed)?;
            println!("Seed: {}", board.seed());
            println!("{board}");
            print!("{}", board.moves());
        }
        Command::Play {
            seed,
            max_steps,
            out,
        } => {
            let run = play_greedy(seed, max_steps)?;
            println!("{}", run.final_board);
            info!(
                "seed {} finished after {} moves, highest tile {}",
                seed,
                run.steps(),
                run.final_board.highest_tile()
            );
            if let Some(path) = out {
                trace::write_trace_to_path(&path, &run)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!("trace written to {}", path.display());
            }
        }
        Command::Replay { path } => {
            let run = trace::parse_trace_file(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let boards = run.replay()?;
            println!("{}", run.final_board);
            info!(
                "{}: seed {} replays cleanly over {} boards",
                path.display(),
                run.seed,
                boards.len()
            );
        }
        Command::Sweep { from, to, threads } => sweep(from, to, threads)?,
    }
    Ok(())
}

fn sweep(from: u64, to: u64, threads: Option<usize>) -> Result<()> {
    if to <= from {
        bail!("empty seed range {from}..{to}");
    }
    if let Some(n) = threads {
        if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(n).build_global() {
            warn!("could not size thread pool: {e}");
        }
    }

    let pb = ProgressBar::new(to - from);
    pb.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} seeds ({eta})",
        )?
        .progress_chars("=>-"),
    );
    let results: Vec<(usize, u16)> = (from..to)
        .into_par_iter()
        .map(|seed| {
            let run = play_greedy(seed, None);
            pb.inc(1);
            run.map(|r| (r.steps(), r.final_board.highest_tile()))
        })
        .collect::<Result<_, _>>()?;
    pb.finish_and_clear();

    let n = results.len();
    let total: usize = results.iter().map(|(steps, _)| steps).sum();
    let min = results.iter().map(|(steps, _)| *steps).min().unwrap_or(0);
    let max = results.iter().map(|(steps, _)| *steps).max().unwrap_or(0);
    let best = results.iter().map(|(_, tile)| *tile).max().unwrap_or(0);
    println!(
        "{n} games: moves min {min} / mean {:.1} / max {max}, best tile {best}",
        total as f64 / n as f64
    );
    Ok(())
}
