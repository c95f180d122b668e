//! kpttree: a terminal view of a project's kpt packages.
//!
//! This binary parses the command line, initialises logging and the
//! terminal, runs the main event loop and restores the terminal on exit or
//! panic.

mod app;
mod editor;
mod icons;
mod input;
mod print;
mod render;
mod ui;

use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kpttree_core::{CacheRegistry, Config, KptProject, TreeItem, TreeMessage};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::app::App;
use crate::editor::TerminalEditor;
use crate::input::{handle_key, InputAction, InputState};
use crate::render::render;

/// Browse the kpt packages of a project.
#[derive(Debug, Parser)]
#[command(name = "kpttree", version, about)]
struct Args {
    /// Project root. Defaults to the current directory.
    project: Option<PathBuf>,

    /// Configuration file to use instead of the standard locations.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the filtered tree to stdout and exit.
    #[arg(long)]
    print: bool,
}

fn setup_terminal() -> anyhow::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Sends tracing output to `log_file` so it never interferes with the
/// terminal.
fn init_logging(log_file: &str) -> anyhow::Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("failed to open log file {log_file}"))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .init();
    Ok(())
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    match explicit {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::load_first(&Config::default_locations())?),
    }
}

fn resolve_project_root(arg: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    let root = match arg {
        Some(path) => path,
        None => std::env::current_dir().context("failed to get current directory")?,
    };
    root.canonicalize()
        .with_context(|| format!("cannot open project {}", root.display()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;
    init_logging(&config.general.log_file)?;

    let project_root = resolve_project_root(args.project)?;

    if args.print {
        return print_tree(&project_root);
    }

    install_panic_hook();

    let mut terminal = setup_terminal()?;

    let result = run_app(&mut terminal, &project_root, &config).await;

    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    Ok(())
}

fn print_tree(project_root: &Path) -> anyhow::Result<()> {
    let project = KptProject::open_static(project_root, CacheRegistry::global());
    let Some(root) = project.root_node() else {
        anyhow::bail!(
            "{} has no {}",
            project_root.display(),
            kpttree_core::MANIFEST_RELATIVE_PATH
        );
    };
    for line in print::tree_lines(&root) {
        println!("{line}");
    }
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    project_root: &Path,
    config: &Config,
) -> anyhow::Result<()> {
    let (tree_tx, mut tree_rx) = mpsc::unbounded_channel::<TreeMessage>();
    let project = KptProject::open(
        project_root,
        CacheRegistry::global(),
        tree_tx,
        Handle::current(),
    );

    let mut app = App::new(project.root_node());
    let mut input_state = InputState::new();

    loop {
        // 1. Drain tree messages
        while let Ok(msg) = tree_rx.try_recv() {
            app = match msg {
                TreeMessage::Rebuild { project: id } if id == project.id() => {
                    app.with_rebuilt(project.root_node())
                }
                TreeMessage::Rebuild { .. } => app,
                TreeMessage::WatchError { message, .. } => {
                    tracing::warn!("watch error: {message}");
                    app.with_status(format!("Watch error: {message}"))
                }
            };
        }

        // 2. Render
        terminal.draw(|f| render(f, &app, &project, config))?;

        // 3. Poll for input with timeout
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let (action, new_state) = handle_key(key, &input_state);
        input_state = new_state;
        if action != InputAction::None {
            app = app.with_clear_status();
        }

        app = match action {
            InputAction::None => app,
            InputAction::CursorDown => app.with_cursor_down(),
            InputAction::CursorUp => app.with_cursor_up(),
            InputAction::CursorTop => app.with_cursor_top(),
            InputAction::CursorBottom => app.with_cursor_bottom(),
            InputAction::Expand => app.with_expand(),
            InputAction::Collapse => app.with_collapse(),
            InputAction::Activate => activate(app, terminal, config),
            InputAction::Refresh => {
                project.rescan().await;
                app.with_rebuilt(project.root_node())
                    .with_status("Rescanned".to_string())
            }
            InputAction::Quit => app.with_quit(),
        };

        if app.should_quit() {
            break;
        }
    }

    project.close();
    Ok(())
}

/// Toggles a directory or opens a file in the editor.
fn activate(app: App, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, config: &Config) -> App {
    let Some(row) = app.selected_row() else {
        return app;
    };
    if row.is_dir() {
        return app.with_toggle();
    }

    let node = row.node().clone();
    let mut editor = TerminalEditor::new(terminal, config.general.editor_command());
    match node.navigate(&mut editor) {
        Ok(()) => app,
        Err(e) => {
            tracing::warn!(path = %node.entry().path().display(), "editor failed: {e}");
            app.with_status(format!("Editor error: {e}"))
        }
    }
}
