//! CLI for the chiplist processor catalog.
//!
//! Runs the interactive catalog menu, or echoes a saved catalog file.

mod menu;

use std::io;
use std::path::{Path, PathBuf};

use chiplist::{Catalog, CatalogConfig};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::menu::Menu;

/// chiplist: bounded processor catalog console.
#[derive(Parser)]
#[command(name = "chiplist", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Start the interactive catalog menu (the default).
    Menu(SessionArgs),

    /// Print a saved catalog file without starting a session.
    Show {
        /// Path to the catalog file.
        path: PathBuf,
    },
}

/// Options shared by commands that open a catalog session.
#[derive(Args, Clone, Debug, Default)]
struct SessionArgs {
    /// JSON config file with `capacity` and `dump_path`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum number of records (overrides the config file).
    #[arg(long)]
    capacity: Option<usize>,

    /// Catalog file used by save, load and restore (overrides the config file).
    #[arg(long)]
    dump_path: Option<PathBuf>,
}

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        None => cmd_menu(&SessionArgs::default()),
        Some(Commands::Menu(args)) => cmd_menu(&args),
        Some(Commands::Show { path }) => cmd_show(&path),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Installs a stderr subscriber filtered by `RUST_LOG` (default `error`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Implements `chiplist menu`.
fn cmd_menu(args: &SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = session_config(args)?;
    tracing::info!(
        capacity = config.capacity,
        dump_path = %config.dump_path.display(),
        "starting catalog session"
    );

    let catalog = Catalog::open(config)?;
    let mut menu = Menu::new(catalog, io::stdin().lock(), io::stdout().lock());
    menu.run()?;

    Ok(())
}

/// Implements `chiplist show <path>`.
fn cmd_show(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = chiplist::dump::read_dump(path)?;
    if text.is_empty() {
        println!("(empty catalog file)");
    } else {
        print!("{text}");
    }
    Ok(())
}

/// Builds the session config: file (or defaults), then flag overrides.
fn session_config(args: &SessionArgs) -> chiplist::Result<CatalogConfig> {
    let mut config = match &args.config {
        Some(path) => CatalogConfig::load(path)?,
        None => CatalogConfig::default(),
    };

    if let Some(capacity) = args.capacity {
        config.capacity = capacity;
    }
    if let Some(dump_path) = &args.dump_path {
        config.dump_path.clone_from(dump_path);
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::tempdir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_menu_is_default_command() {
        let cli = Cli::try_parse_from(["chiplist"]).unwrap();
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["chiplist", "menu", "--capacity", "8"]).unwrap();
        match cli.command {
            Some(Commands::Menu(args)) => assert_eq!(args.capacity, Some(8)),
            _ => panic!("expected menu command"),
        }
    }

    #[test]
    fn test_session_config_defaults() {
        let config = session_config(&SessionArgs::default()).unwrap();
        assert_eq!(config, CatalogConfig::default());
    }

    #[test]
    fn test_flags_override_config_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("chiplist.json");
        std::fs::write(&path, r#"{ "capacity": 3, "dump_path": "from_file.txt" }"#).unwrap();

        let args = SessionArgs {
            config: Some(path.clone()),
            capacity: None,
            dump_path: Some(PathBuf::from("from_flag.txt")),
        };
        let config = session_config(&args).unwrap();
        assert_eq!(config.capacity, 3);
        assert_eq!(config.dump_path, PathBuf::from("from_flag.txt"));

        let args = SessionArgs {
            config: Some(path),
            capacity: Some(0),
            dump_path: None,
        };
        assert!(session_config(&args).is_err());
    }
}
