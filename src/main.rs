mod display;

use std::io::{stdout, BufWriter, Write};
use std::path::Path;
use std::sync::Mutex;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use led_invaders::config::{Cli, Config};
use led_invaders::difficulty::Level;
use led_invaders::link::PanelLinks;
use led_invaders::session::{Command, Session};

// ── Key mapping ───────────────────────────────────────────────────────────────

enum Action {
    Game(Command),
    TogglePanel(usize),
    TestPanels,
    Quit,
}

fn action_for(key: KeyEvent, overlay_open: bool) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    let action = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('c') | KeyCode::Char('C') => Action::Game(Command::ToggleOverlay),
        KeyCode::Char('t') | KeyCode::Char('T') if overlay_open => Action::TestPanels,
        KeyCode::Char(c) if overlay_open => Action::TogglePanel(display::panel_for_key(c)?),
        _ if overlay_open => return None,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Action::Game(Command::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Action::Game(Command::MoveRight)
        }
        KeyCode::Char(' ') => Action::Game(Command::Fire),
        KeyCode::Char('p') | KeyCode::Char('P') => Action::Game(Command::TogglePause),
        KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => {
            Action::Game(Command::StartOrReset)
        }
        KeyCode::Char('1') => Action::Game(Command::SelectLevel(Level::Easy)),
        KeyCode::Char('2') => Action::Game(Command::SelectLevel(Level::Normal)),
        KeyCode::Char('3') => Action::Game(Command::SelectLevel(Level::Hard)),
        _ => return None,
    };
    Some(action)
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// One fixed-rate timer drives simulate → render → send → mirror; key events
/// are handled between ticks on the same task, so nothing overlaps.
async fn game_loop<W: Write>(
    out: &mut W,
    config: &Config,
    seed: Option<u64>,
    mut rx: mpsc::UnboundedReceiver<Event>,
) -> Result<()> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(config.difficulty, config.round_settings(), rng);
    let mut links = PanelLinks::new(config.endpoints()?);
    links.connect_all().await;
    info!(connected = links.connected_count(), "panel links ready");

    let started = Instant::now();
    let now_ms = || started.elapsed().as_millis() as u64;
    let mut ticker = tokio::time::interval(Duration::from_millis(config.tick_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                for cue in session.advance(now_ms()) {
                    debug!(?cue, "sound cue");
                }
                if session.should_send() {
                    links.send_frame(session.frame()).await;
                }
                links.flush_tests(Instant::now()).await;
                if config.mirror {
                    display::render(out, session.frame(), &display::Hud::new(&session, &links))?;
                }
            }
            event = rx.recv() => {
                let Some(event) = event else { break };
                let Event::Key(key) = event else { continue };
                match action_for(key, session.overlay_open()) {
                    Some(Action::Quit) => break,
                    Some(Action::Game(command)) => session.handle(command, now_ms()),
                    Some(Action::TogglePanel(index)) => links.toggle(index).await,
                    Some(Action::TestPanels) => links.test_all().await,
                    None => {}
                }
            }
        }
    }

    links.disconnect_all().await;
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::resolve(cli.config.as_deref()).context("failed to load config")?;
    config.apply_cli(&cli)?;
    init_logging(&cli.log_file)?;
    info!(?config, "starting");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::unbounded_channel::<Event>();
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

    let result = runtime.block_on(game_loop(&mut out, &config, cli.seed, rx));
    runtime.shutdown_timeout(Duration::from_millis(500));

    // Always restore the terminal
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}
