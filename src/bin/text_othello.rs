//! Terminal Othello: you play black (`x`) against the computer.
//!
//! Type cell keys and press enter: `d2` then enter plays column d, row 2.
//! `<` `>` `^` `v` move the cursor, `new` restarts, `quit` exits.
//!
//! With `--self-play` the computer plays both colors instead.

use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;
use tracing::info;

use othello::transport::{ControllerEnd, spawn_game_loop};
use othello::{
    BitboardEngine, Controller, EngineConfig, Key, SelfPlay, Side, TransportError,
    logging, text,
};

#[derive(Debug, Parser)]
#[command(name = "text_othello", about = "Play Othello against the computer")]
struct Args {
    /// Search depth of the computer, 1-6.
    #[arg(long, default_value_t = EngineConfig::default().level)]
    level: u8,

    /// Time budget for one computer move, in milliseconds.
    #[arg(long, default_value_t = EngineConfig::default().timeout_ms)]
    timeout_ms: u64,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    log: String,

    /// Let the computer play black too.
    #[arg(long)]
    self_play: bool,

    /// Seed for the random self-play openings; defaults to the clock.
    #[arg(long, requires = "self_play")]
    seed: Option<u64>,

    /// Number of self-play games.
    #[arg(long, default_value_t = 1, requires = "self_play")]
    games: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    logging::init(&args.log);

    let config = EngineConfig {
        level: args.level,
        timeout_ms: args.timeout_ms,
    };
    info!(?config, "starting");

    if args.self_play {
        let seed = args.seed.unwrap_or_else(clock_seed);
        return self_play(config, seed, args.games);
    }

    let (link, worker) = spawn_game_loop(move || BitboardEngine::new(config))?;
    let mut controller = Controller::new(link.sender());

    let result = play(&link, &mut controller);
    drop(controller);
    drop(link);
    if let Ok(Err(err)) = worker.join() {
        info!(%err, "game loop ended");
    }
    result
}

fn play(link: &ControllerEnd, controller: &mut Controller) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        sync(link, controller)?;
        if controller.is_engine_unavailable() {
            return Err("the engine could not be started".into());
        }

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next().transpose()? else {
            return Ok(());
        };

        match line.trim() {
            "quit" | "q" => return Ok(()),
            "new" => controller.new_game()?,
            input => {
                for key in input.chars().filter_map(Key::from_char) {
                    controller.key(key)?;
                }
                controller.key(Key::Confirm)?;
            }
        }
    }
}

fn self_play(config: EngineConfig, seed: u64, games: u32) -> Result<(), Box<dyn std::error::Error>> {
    info!(seed, games, "self-play");
    let mut game = SelfPlay::new(config, seed)?;

    for n in 0..games {
        if n > 0 {
            game.new_game();
        }
        println!("\nNew game!");
        println!("{}", game.engine().board());

        let (black, white) = game.play_out(|game, ply| {
            let who = match ply.side {
                Side::Black => "Black",
                Side::White => "White",
            };
            println!("{who}'s move.. {}", ply.position);
            println!("After {} moves:", game.plies());
            println!("{}", game.engine().board());
        });
        println!("Game over: (black--white) {black}--{white}");
    }
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}

/// Feeds responses to the controller until nothing is pending, printing
/// every snapshot, including the ones shown while the computer thinks.
fn sync(link: &ControllerEnd, controller: &mut Controller) -> Result<(), TransportError> {
    while controller.is_busy() {
        controller.receive(link.recv()?)?;
        if !controller.is_engine_unavailable() {
            println!("\n{}", text::render(controller));
        }
    }
    Ok(())
}
