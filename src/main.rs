mod display;
mod keyboard;

use std::fs::File;
use std::io::{stdout, BufWriter};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

use blast_field::config::GameConfig;
use blast_field::error::GameError;
use blast_field::frame_loop::{EndReason, Ending, FrameLoop, RealtimePacer};

use crate::display::{builtin_catalog, Skin, TerminalCanvas};
use crate::keyboard::KeyboardInput;

const LOG_PATH_ENV: &str = "BLAST_FIELD_LOG";

/// Log to a file: stderr shares the terminal with the alternate screen.
fn init_logging() {
    let path = std::env::var_os(LOG_PATH_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("blast_field.log"));

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    match File::create(&path) {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
        Err(_) => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
}

fn main() -> Result<(), GameError> {
    init_logging();

    // Everything that can fail on configuration fails here, before the
    // terminal is touched.
    let config = GameConfig::from_env()?;
    let skin = Skin::load(&builtin_catalog())?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();
    if !keyboard_enhanced {
        warn!("terminal has no key-release events; falling back to hold window");
    }

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the frame loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = run(&mut out, skin, config, rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    let ending = result?;
    match ending.reason {
        EndReason::GameOver => println!("Game over. Score: {}", ending.score),
        EndReason::Quit => println!("Score: {}", ending.score),
    }
    Ok(())
}

fn run(
    out: &mut BufWriter<std::io::Stdout>,
    skin: Skin,
    config: GameConfig,
    rx: mpsc::Receiver<Event>,
) -> Result<Ending, GameError> {
    let mut rng = match config.seed {
        Some(seed) => {
            info!("hazard seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let mut canvas = TerminalCanvas::new(out, skin, config.field(), terminal::size()?);
    let mut input = KeyboardInput::new(rx);
    let mut pacer = RealtimePacer::new(config.frame_budget());

    let mut game = FrameLoop::new(config, &mut rng);
    game.run(&mut input, &mut canvas, &mut pacer)
}
