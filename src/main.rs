mod app;
mod components;
mod config;
mod error;
mod event;
mod fs;
mod handler;
mod open;
mod theme;
mod tui;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::app::App;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::event::{Event, EventHandler};
use crate::fs::tree::{FilterPolicy, FolderTree};
use crate::open::{exit_code, OutputFormat};
use crate::tui::{install_panic_hook, Tui};

/// A terminal folder browser that hands picked files to a host image viewer.
#[derive(Parser, Debug)]
#[command(name = "folder_browser", version, about)]
struct Cli {
    /// Root directory to browse (defaults to config, then current directory)
    path: Option<PathBuf>,

    /// Initial filter pattern
    #[arg(long)]
    filter: Option<String>,

    /// Explicit config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format for open requests: lines, null, json
    #[arg(long)]
    output: Option<String>,

    /// External viewer command; selections are passed to it and the
    /// browser keeps running
    #[arg(long)]
    exec: Option<String>,

    /// Show hidden files
    #[arg(long)]
    show_hidden: bool,

    /// List only files with known image extensions
    #[arg(long)]
    images_only: bool,

    /// Disable mouse support
    #[arg(long)]
    no_mouse: bool,
}

impl Cli {
    /// Partial config derived from CLI flags; `Some` values override files.
    fn overrides(&self) -> AppConfig {
        let mut overrides = AppConfig::default();
        overrides.general.start_path = self.path.as_ref().map(|p| p.display().to_string());
        overrides.general.show_hidden = self.show_hidden.then_some(true);
        overrides.general.mouse = self.no_mouse.then_some(false);
        overrides.filter.pattern = self.filter.clone();
        overrides.filter.images_only = self.images_only.then_some(true);
        overrides.open.output = self.output.clone();
        overrides.open.exec = self.exec.clone();
        overrides
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref(), Some(&cli.overrides()));

    let output: OutputFormat = match config.open_output().parse() {
        Ok(format) => format,
        Err(()) => {
            eprintln!("Unknown output format: {}", config.open_output());
            std::process::exit(exit_code::ERROR);
        }
    };

    match run(&config, output).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(exit_code::ERROR);
        }
    }
}

async fn run(config: &AppConfig, output: OutputFormat) -> error::Result<i32> {
    let start = PathBuf::from(config.general.start_path.as_deref().unwrap_or("."));
    let root = start
        .canonicalize()
        .map_err(|_| AppError::InvalidRoot(start.clone()))?;

    let mut tree = FolderTree::new(&root)?;
    tree.show_hidden = config.show_hidden();
    tree.images_only = config.images_only();
    tree.policy = FilterPolicy::from_str(config.filter_policy());
    // Applies the pattern and recomputes visibility with the flags above.
    tree.set_filter(config.filter_pattern());

    let theme = theme::resolve_theme(&config.theme);
    let mut app = App::new(tree, config.open_exec().map(str::to_string));

    install_panic_hook();
    let mut tui = Tui::new(config.mouse_enabled())?;
    let mut events = EventHandler::new(Duration::from_millis(16));

    loop {
        app.clear_expired_status();
        tui.terminal_mut()
            .draw(|frame| ui::render(&mut app, &theme, frame))?;

        match events.next().await? {
            Event::Key(key) => handler::handle_key_event(&mut app, key),
            Event::Mouse(mouse) => handler::handle_mouse_event(&mut app, mouse),
            Event::Tick => {}
            Event::Resize(_, _) => {}
        }

        if app.should_quit {
            break;
        }
    }

    tui.restore()?;

    // Deliver the pending open request now that stdout is usable again.
    if let Some(request) = app.pending_open.take() {
        request.emit(output)?;
        return Ok(exit_code::SUCCESS);
    }
    if app.opened_any {
        return Ok(exit_code::SUCCESS);
    }
    Ok(exit_code::CANCELLED)
}
