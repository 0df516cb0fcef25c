//! Saccade Sim entry point
//!
//! Generates one episode and writes a JSON snapshot per step to stdout.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use saccade_sim::{Episode, RandomAgent, SaccadeAgent, SaccadeConfig, SaccadeSource, SimError};

#[derive(Parser, Debug)]
#[command(name = "saccade-sim")]
#[command(about = "Generate moving-object and saccade episodes as JSON lines")]
struct Args {
    /// Random seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Number of steps to generate
    #[arg(short = 'n', long, default_value_t = 100)]
    steps: u64,

    /// Path to a JSON config (defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Drive external saccade plans with a random agent
    #[arg(long)]
    agent: bool,

    /// Print the effective config and exit
    #[arg(long)]
    print_config: bool,
}

fn run(args: &Args) -> Result<(), SimError> {
    let mut config = match &args.config {
        Some(path) => SaccadeConfig::load(path)?,
        None => SaccadeConfig::default(),
    };
    if args.agent && config.saccade_source == SaccadeSource::Random {
        config.saccade_source = SaccadeSource::ExternalOrRandom;
    }

    if args.print_config {
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    let mut episode = Episode::from_seed(config, args.seed)?;
    let mut agent = args
        .agent
        .then(|| RandomAgent::from_seed(episode.config().saccade_max, args.seed.wrapping_add(1)));

    log::info!(
        "Generating {} steps, seed {}, {} objects, source {}, agent {}",
        args.steps,
        args.seed,
        episode.config().num_objects,
        episode.config().saccade_source.as_str(),
        agent.as_ref().map_or("none", |a| a.name())
    );

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut saccades = 0u64;
    let mut trajectories = 0u64;

    for _ in 0..args.steps {
        let result = match agent.as_mut() {
            Some(agent) => episode.step_with_agent(agent)?,
            None => episode.step()?,
        };
        saccades += u64::from(result.rolled_over_saccade);
        trajectories += u64::from(result.rolled_over_trajectory);

        let state = episode.current_state();
        log::debug!("{}", state.trial_name());
        serde_json::to_writer(&mut out, &state)?;
        writeln!(out)?;
    }
    out.flush()?;

    log::info!(
        "Done: {} steps, {} trajectories, {} saccades",
        episode.steps(),
        trajectories,
        saccades
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("saccade-sim: {e}");
            ExitCode::FAILURE
        }
    }
}
