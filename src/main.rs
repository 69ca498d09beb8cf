use crate::config::Config;
use crate::manager::StudentManager;
use crate::menu::Menu;
use crate::storage::JsonFile;
use clap::Parser;
use eyre::WrapErr;
use std::io;
use std::path::PathBuf;
use tracing::{Level, info};

mod config;
mod display;
mod error;
mod manager;
mod menu;
mod model;
mod stats;
mod storage;

#[derive(Parser)]
#[command(author, version, about)]
struct Args {
    /// Use FILE instead of rgrades.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Roster file, overriding the one from the configuration
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,
    /// Set verbosity level (repeat for more)
    #[arg(short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    let level = match args.verbose {
        0 => Level::ERROR,
        1 => Level::WARN,
        2 => Level::INFO,
        3 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
    let config = Config::load(args.config.as_deref())?;
    let file = args.file.unwrap_or_else(|| config.storage.file.clone());
    let storage = JsonFile::new(file);
    let path = storage.path().to_owned();
    let mut manager = StudentManager::open(Box::new(storage))
        .wrap_err_with(|| format!("cannot open roster {}", path.display()))?;
    info!(students = manager.len(), "starting interactive menu");
    let stdin = io::stdin();
    Menu::new(&mut manager, &config.menu, stdin.lock(), io::stdout()).run()
}
