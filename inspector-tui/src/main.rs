mod app;
mod clipboard;
mod demo;
mod error;
mod events;
mod menu;
mod paths;
mod render;
mod settings;
mod terminal;

use std::fs::{self, File};
use std::path::PathBuf;
use std::time::Duration;

use inspector_lib::store::TreeSnapshot;
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::app::{build_view, App};
use crate::clipboard::Osc52Clipboard;
use crate::error::AppError;
use crate::render::Frame;
use crate::terminal::Terminal;

fn init_logging() {
    let Some(path) = paths::log_file() else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            if WriteLogger::init(LevelFilter::Debug, Config::default(), file).is_err() {
                eprintln!("logger already initialized");
            }
        }
        Err(e) => eprintln!("cannot create log file {}: {}", path.display(), e),
    }
}

/// Load the snapshot named on the command line, or the built-in demo tree.
fn load_snapshot() -> Result<TreeSnapshot, AppError> {
    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            let json = fs::read_to_string(&path)
                .map_err(|source| AppError::ReadSnapshot { path, source })?;
            Ok(TreeSnapshot::from_json(&json)?)
        }
        None => Ok(demo::snapshot()),
    }
}

fn run() -> Result<(), AppError> {
    let config = settings::load_or_default(paths::config_file().as_deref());
    let view = build_view(load_snapshot()?, &config)?;
    log::info!(
        "loaded {} nodes, {} visible",
        view.store().len(),
        view.projection().len()
    );

    let mut app = App::new(view, Osc52Clipboard::stdout());
    let mut terminal = Terminal::new()?;
    let mut redraw = true;

    while !app.should_quit() {
        if redraw || app.is_dirty() {
            let (width, height) = terminal.size()?;
            let data = app.frame(height.saturating_sub(1) as usize);
            let frame = Frame {
                rows: &data.rows,
                guides: &data.guides,
                status: &data.status,
                menu: app.menu().current(),
            };
            render::draw(terminal.out(), &frame, width, height)?;
            redraw = false;
        }

        for event in terminal.poll(Duration::from_millis(250))? {
            if let Some(event) = events::convert_event(event) {
                redraw = true;
                app.handle_event(event);
            }
        }
    }
    Ok(())
}

fn main() {
    init_logging();
    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
