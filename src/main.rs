//! # Delve Main Entry Point
//!
//! Parses the CLI, initializes logging and audio, and runs the macroquad
//! frame loop that feeds input into the turn engine.

use clap::Parser;
use delve::{
    CompletionState, Display, GameState, GenerationConfig, InputHandler, MusicPlayer, PlayerInput,
};
use log::info;
use macroquad::prelude::*;

/// Minimum seconds between repeated moves while a key is held.
const MOVE_REPEAT_DELAY: f64 = 0.12;

/// Command line arguments for delve.
#[derive(Parser, Debug)]
#[command(name = "delve")]
#[command(about = "A minimal tile-based roguelike with a generative soundtrack")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Disable the background music loop
    #[arg(long)]
    no_music: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[macroquad::main("Delve")]
async fn main() -> delve::DelveResult<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(args.log_level.clone()),
    )
    .init();

    info!("starting delve v{}", delve::VERSION);

    let seed = args.seed.unwrap_or_else(|| macroquad::miniquad::date::now() as u64);
    info!("generating dungeon with seed {seed}");

    let mut state = GameState::with_config(GenerationConfig::new(seed))?;
    let input = InputHandler::new();
    let display = Display::new();

    let mut music = if args.no_music {
        None
    } else {
        Some(MusicPlayer::start())
    };

    let mut last_move_time = 0.0;

    loop {
        match input.poll() {
            Some(PlayerInput::Quit) => {
                info!("player quit");
                break;
            }
            Some(PlayerInput::Restart) => {
                state.restart()?;
                last_move_time = 0.0;
            }
            Some(PlayerInput::Move(direction)) => {
                // Held keys repeat at a fixed cadence; each repeat is one
                // discrete turn.
                let now = get_time();
                if now - last_move_time >= MOVE_REPEAT_DELAY
                    && state.completion() == CompletionState::Playing
                {
                    state.advance(direction)?;
                    last_move_time = now;
                }
            }
            None => {}
        }

        display.render(&state);
        next_frame().await;
    }

    if let Some(music) = music.as_mut() {
        music.stop();
    }

    Ok(())
}
