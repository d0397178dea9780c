//! Terminal pipe game runner (default binary).
//!
//! It uses crossterm for keyboard and mouse input and the framebuffer-based
//! renderer from `tui_pipes::term`. Logs go to a file because the terminal
//! is busy showing the game.

use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use tui_pipes::core::{Board, GameConfig, GameSnapshot, PlaceError, ScreenGeometry};
use tui_pipes::input::{handle_key_event, mouse_click, should_quit, Cursor};
use tui_pipes::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use tui_pipes::types::{GameAction, GridPos, TICK_MS};

#[derive(Parser, Debug)]
#[command(name = "tui-pipes", version, about = "Lay pipes ahead of the flow")]
struct Args {
    /// JSON game configuration; missing fields keep their defaults.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Seed for tile generation (overrides the configuration).
    #[arg(long)]
    seed: Option<u32>,
    /// Tracing filter, e.g. "info" or "tui_pipes_core=debug". RUST_LOG wins when set.
    #[arg(long, default_value = "info")]
    log: String,
    /// File the log is written to.
    #[arg(long, default_value = "tui-pipes.log")]
    log_file: PathBuf,
    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    if args.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }
    init_tracing(&args)?;
    info!(
        seed = config.seed,
        columns = config.columns,
        lines = config.lines,
        "starting game"
    );

    let mut board = Board::new(config).context("invalid game configuration")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut board);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn load_config(args: &Args) -> Result<GameConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            GameConfig::from_json_str(&json)
                .with_context(|| format!("loading {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    // Slots are drawn in terminal cells, so clicks must be mapped the same way.
    config.screen = ScreenGeometry::TERMINAL;
    config.validate()?;
    Ok(config)
}

fn init_tracing(args: &Args) -> Result<()> {
    let file = File::create(&args.log_file)
        .with_context(|| format!("creating log file {}", args.log_file.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log))
        .context("invalid --log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run(term: &mut TerminalRenderer, board: &mut Board) -> Result<()> {
    let view = GameView::new(board.config().screen);
    let mut cursor = Cursor::new(board.columns(), board.lines(), board.config().start.pos());
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick_duration = Duration::from_millis(u64::from(TICK_MS));
    let mut last_tick = Instant::now();

    loop {
        // Render.
        board.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Some(cursor.pos()), Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        apply_action(board, &mut cursor, action);
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some((x, y)) = mouse_click(mouse) {
                        if let Some(pos) = report(board.place(x, y)) {
                            cursor.set(pos);
                        }
                    }
                }
                Event::Resize(_, _) => term.invalidate(),
                _ => {}
            }
        }

        // Tick with the real elapsed time so the flow speed does not depend
        // on how often input wakes the loop.
        let elapsed = last_tick.elapsed();
        if elapsed >= tick_duration {
            last_tick = Instant::now();
            board.tick(u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX));
        }
    }
}

fn apply_action(board: &mut Board, cursor: &mut Cursor, action: GameAction) {
    if cursor.apply(action) {
        return;
    }
    match action {
        GameAction::Place => {
            report(board.place_at(cursor.pos()));
        }
        GameAction::Restart => {
            let seed = board.config().seed.wrapping_add(1);
            board.restart(seed);
            info!(seed, "new game");
        }
        _ => {}
    }
}

fn report(result: Result<GridPos, PlaceError>) -> Option<GridPos> {
    match result {
        Ok(pos) => Some(pos),
        Err(err) => {
            debug!(code = err.code(), "placement refused: {}", err.message());
            None
        }
    }
}
