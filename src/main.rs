use std::path::PathBuf;
use std::process;

use clap::Parser;
use dialclock::{Clock, ClockConfig, FixedClock, SystemClock, WallClock, WallTime};

/// Rotating-dial clock face.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TrueType or OpenType font used for every label
    #[arg(long)]
    font: PathBuf,

    #[arg(long, default_value_t = 480)]
    width: usize,

    #[arg(long, default_value_t = 480)]
    height: usize,

    /// Render one frame to this PNG file instead of opening a window
    #[arg(long, value_name = "PNG")]
    snapshot: Option<PathBuf>,

    /// Seed from a fixed time instead of the local clock
    #[arg(long, value_name = "HH:MM:SS", value_parser = parse_time)]
    time: Option<WallTime>,
}

fn parse_time(s: &str) -> Result<WallTime, String> {
    s.parse().map_err(|err: dialclock::ClockError| err.to_string())
}

fn run(args: Args) -> dialclock::Result<()> {
    let config = ClockConfig::builder()
        .window_width(args.width)
        .window_height(args.height)
        .build();
    let clock = Clock::from_font_file(config, &args.font)?;

    let fixed = args.time.map(FixedClock);
    let wall: &dyn WallClock = match &fixed {
        Some(fixed) => fixed,
        None => &SystemClock,
    };

    match args.snapshot {
        Some(path) => clock.snapshot(wall, &path),
        None => clock.show_with_clock(wall),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(err) = run(Args::parse()) {
        log::error!("{err}");
        eprintln!("error: {err}");
        process::exit(1);
    }
}
