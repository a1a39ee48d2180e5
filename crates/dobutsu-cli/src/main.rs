// Terminal front-end: play against the engine or watch a self-play game

mod game;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use dobutsu_core::ruleset::Ruleset;
use dobutsu_core::search::DEFAULT_SEARCH_DEPTH;
use dobutsu_core::types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Variant {
    /// 4x3 "catch the lion"
    Micro,
    /// 6x5 "goro-goro"
    Goro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Side {
    Sky,
    Land,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Game variant to play
    #[arg(long, value_enum, default_value_t = Variant::Micro)]
    variant: Variant,

    /// Search depth for the computer side
    #[arg(long, default_value_t = DEFAULT_SEARCH_DEPTH)]
    depth: u8,

    /// Side played by the human
    #[arg(long, value_enum, default_value_t = Side::Sky)]
    side: Side,

    /// Let the computer play both sides
    #[arg(long)]
    selfplay: bool,

    /// Stop after this many plies if no result was reached
    #[arg(long, default_value_t = 500)]
    max_moves: u32,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let args = Args::parse();

    use std::io::Write;
    let log_level = if args.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, log_level),
    )
    .format(|buf, record| {
        writeln!(buf, "[{}] {}: {}", record.level(), record.target(), record.args())
    })
    .write_style(env_logger::WriteStyle::Never)
    .target(env_logger::Target::Stderr)
    .init();

    if let Err(e) = run(args) {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let ruleset = match args.variant {
        Variant::Micro => Ruleset::micro(),
        Variant::Goro => Ruleset::goro(),
    };
    let human = if args.selfplay {
        None
    } else {
        Some(match args.side {
            Side::Sky => Color::Sky,
            Side::Land => Color::Land,
        })
    };
    game::run(ruleset, args.depth, human, args.max_moves)
}
