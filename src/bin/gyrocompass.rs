//! Replay a recorded sensor stream through the orientation estimator.
//!
//! Usage:
//!   cargo run --bin gyrocompass -- --input recording.jsonl
//!   cat recording.jsonl | cargo run --bin gyrocompass
//!
//! Enable per-sample logging:
//!   RUST_LOG=debug cargo run --bin gyrocompass -- --input recording.jsonl

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::{error, info};

use gyrocompass::{AppConfig, ConsoleRenderer, JsonLinesSource, Result, SampleSource, Session};

/// Compass heading and barrel roll/pitch from recorded sensor samples
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON-lines recording to replay ("-" for stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Print a status line every N updates (0 = never)
    #[arg(long)]
    render_every: Option<u32>,

    /// Stop after N events
    #[arg(long)]
    max_events: Option<u64>,
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    if let Some(input) = &args.input {
        config.input = (input.as_os_str() != "-").then(|| input.clone());
    }
    if let Some(every) = args.render_every {
        config.render_every = every;
    }
    if args.max_events.is_some() {
        config.max_events = args.max_events;
    }
    config.validate()?;
    Ok(config)
}

fn run(args: Args) -> Result<()> {
    let config = load_config(&args)?;

    let mut session = Session::new().with_max_events(config.max_events);
    session.add_observer(ConsoleRenderer::new(io::stdout(), config.render_every));

    let mut source: Box<dyn SampleSource> = match &config.input {
        Some(path) => {
            let file = File::open(path)?;
            Box::new(JsonLinesSource::new(
                path.display().to_string(),
                BufReader::new(file),
            ))
        }
        None => Box::new(JsonLinesSource::new("stdin", io::stdin().lock())),
    };

    let stats = session.run(source.as_mut())?;
    let state = session.state();
    info!(
        "final azimuth {:.2}, roll {:.2}, pitch {:.2} ({} gyroscope, {} accelerometer, {} magnetic field samples)",
        state.azimuth,
        state.roll,
        state.pitch,
        stats.angular_velocity,
        stats.acceleration,
        stats.magnetic_field
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(err) = run(args) {
        error!("{err}");
        process::exit(1);
    }
}
