use anyhow::Context;
use clap::Parser;
use frame::{Frame, Surface};
use game::{Game, Viewer};
use input::Command;
use map::{GridMap, Map};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use terminal::Terminal;

mod frame;
mod game;
mod input;
mod map;
mod math;
mod ray;
mod render;
mod terminal;

/// First-person maze walker rendered with characters in the terminal.
///
/// Keys: a/d turn, w/s walk, n/m strafe, h toggles edge smoothing,
/// p toggles the map, Esc or q quits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// text map to load instead of the built-in maze ('+' or '#' wall,
    /// ' ' or '.' open, '*' spawn)
    #[arg(long)]
    map: Option<PathBuf>,

    /// start with edge smoothing off
    #[arg(long)]
    blocky: bool,

    /// start with the map overlay visible
    #[arg(long)]
    show_map: bool,

    /// target frames per second
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u64).range(1..=240))]
    fps: u64,
}

fn main() -> anyhow::Result<()> {
    pretty_env_logger::init_custom_env("TERMCAST_LOG");
    let args = Args::parse();

    let map = match &args.map {
        Some(path) => Map::load(path)?,
        None => {
            log::info!("using built-in map");
            Map::builtin()
        }
    };

    let start = map.spawn().unwrap_or_else(|| Viewer::default().pos());
    if map.is_wall(start) {
        anyhow::bail!("start position {start} is inside a wall; mark a spawn with '*'");
    }

    log::info!("initializing game state");
    let mut game = Game::new(map, Viewer::at(start));
    game.smoothing = !args.blocky;
    game.show_map = args.show_map;

    log::info!("initializing terminal");
    let mut term = Terminal::init()?;
    let mut frame = Frame::default();

    let delta = Duration::from_millis(1_000 / args.fps);

    loop {
        let prev = Instant::now();

        let (width, height) = term.size()?;
        if (width, height) != frame.size() {
            log::debug!("terminal resized to {width}x{height}");
        }
        frame.reset(width, height);
        game.render(&mut frame);
        if let Err(err) = term.present(&frame) {
            log::error!("error while presenting frame: {err}");
            return Err(err);
        }

        let key = term.poll_key().context("could not poll keyboard")?;
        if let Some(command) = key.and_then(Command::from_key) {
            if let ControlFlow::Break(()) = game.apply(command) {
                break;
            }
        }

        let diff = Instant::now() - prev;
        if diff < delta {
            std::thread::sleep(delta - diff);
        }
    }

    log::info!("exiting");
    Ok(())
}
