//! tuneload - bulk loader for music catalog exports
//!
//! Streams artist, genre, and artist-genre export files into DuckDB
//! tables, one multi-row INSERT per batch.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tuneload_core::ProgressContext;

mod cmd;
mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "tuneload")]
#[command(about = "Bulk loader for music catalog exports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file path (default: ./tuneload.toml or ~/.config/tuneload/config.toml)
    #[arg(short, long, global = true)]
    config: Option<std::path::PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Load export files into the database
    Load(cmd::load::LoadArgs),
    /// Create the catalog tables
    Schema(cmd::schema::SchemaArgs),
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let progress = ProgressContext::new();

    // Logging:
    //   TTY:     quiet (warn) unless --debug, progress bars show activity
    //   non-TTY: info unless --debug, logs are the only progress indicator
    let is_tty = progress.is_tty();
    let multi = if is_tty { Some(progress.multi()) } else { None };
    let quiet = if is_tty { !cli.debug } else { false };
    tuneload_core::init_logging(quiet, cli.debug, multi);

    let config = if let Some(path) = cli.config {
        Config::from_file(&path)?
    } else {
        Config::load()?
    };

    match cli.command {
        Command::Load(args) => cmd::load::run(args, &config, &progress),
        Command::Schema(args) => cmd::schema::run(args, &config),
        Command::Config => {
            use comfy_table::{
                Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
            };

            let input = |p: &Option<std::path::PathBuf>| {
                p.as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "not set".to_string())
            };

            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_header(vec![
                    Cell::new("Setting").fg(Color::Cyan),
                    Cell::new("Value").fg(Color::Cyan),
                ]);

            table.add_row(vec!["Database", &config.store.path.display().to_string()]);
            table.add_row(vec!["Artist input", &input(&config.input.artist)]);
            table.add_row(vec!["Genre input", &input(&config.input.genre)]);
            table.add_row(vec!["Artist-genre input", &input(&config.input.artist_genre)]);
            table.add_row(vec!["Batch size", &config.load.batch_size.to_string()]);
            table.add_row(vec![
                "Skip prefix",
                if config.load.skip_prefix.is_empty() {
                    "(none)"
                } else {
                    config.load.skip_prefix.as_str()
                },
            ]);
            table.add_row(vec![
                "Final batch",
                if config.load.strict_drain {
                    "strict"
                } else {
                    "lenient"
                },
            ]);

            eprintln!("\n{table}");
            Ok(())
        }
    }
}
