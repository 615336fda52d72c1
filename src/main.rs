use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{cursor, event, event::Event, terminal, ExecutableCommand};
use rand::thread_rng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dino_runner::config::{AppConfig, DEFAULT_LOG_FILTER, LOG_FILTER_ENV_VAR};
use dino_runner::display::{self, TerminalSurface};
use dino_runner::error::AppError;
use dino_runner::game::{Game, KeyOutcome};
use dino_runner::input::{map_key, Command};
use dino_runner::sprites::SpriteSheet;

/// Longest single wait on the input channel.
const IDLE_WAIT: Duration = Duration::from_millis(250);

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging(config: &AppConfig) -> Result<(), AppError> {
    let file = File::create(&config.log_file).map_err(|e| {
        AppError::Logging(format!("cannot open {}: {}", config.log_file.display(), e))
    })?;
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Single mutator loop. Key events and timer deadlines are funneled through
/// one wait: block on the input channel until the next ticker deadline,
/// then run whatever ticks are due and repaint.
fn game_loop<W: Write>(
    surface: &mut TerminalSurface<W>,
    game: &mut Game<impl rand::Rng>,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    display::render(surface, game.state(), game.sprites())?;

    loop {
        let now = Instant::now();
        let wait = game
            .next_deadline()
            .map(|d| d.saturating_duration_since(now))
            .unwrap_or(IDLE_WAIT)
            .min(IDLE_WAIT);

        let mut dirty = false;
        match rx.recv_timeout(wait) {
            Ok(first) => {
                // Drain everything queued so far, in arrival order.
                for ev in std::iter::once(first).chain(rx.try_iter()) {
                    match ev {
                        Event::Key(key) => match map_key(&key) {
                            Command::JumpOrRestart => {
                                let outcome = game.on_jump_or_restart_key(Instant::now());
                                dirty |= outcome != KeyOutcome::Ignored;
                            }
                            Command::Quit => return Ok(()),
                            Command::Ignore => {}
                        },
                        Event::Resize(cols, rows) => {
                            surface.resize(cols, rows);
                            dirty = true;
                        }
                        _ => {}
                    }
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                error!("input reader stopped");
                return Ok(());
            }
        }

        if game.update(Instant::now()).changed() {
            dirty = true;
        }
        if dirty {
            display::render(surface, game.state(), game.sprites())?;
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), AppError> {
    let config = AppConfig::from_env();
    init_logging(&config)?;
    info!(?config, "starting");

    let sprites = SpriteSheet::load(&config.asset_dir);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
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

    let result = run(&mut out, sprites, &rx);

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        error!(error = %err, "terminal failure");
    }
    info!("exiting");
    result.map_err(AppError::from)
}

fn run<W: Write>(
    out: &mut W,
    sprites: SpriteSheet,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let mut surface = TerminalSurface::new(out, cols, rows);
    let mut game = Game::new(sprites, thread_rng(), Instant::now());
    game_loop(&mut surface, &mut game, rx)
}
