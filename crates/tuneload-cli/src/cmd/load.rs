//! Load subcommand - bulk insert catalog exports into DuckDB

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use comfy_table::{Cell, Color, Table, modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL};
use duckdb::Connection;
use tuneload_catalog::Summary;
use tuneload_core::{DrainPolicy, ProgressContext, fmt_num};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct LoadArgs {
    /// DuckDB database file (default from config: music.duckdb)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Artist export file (.gz accepted)
    #[arg(long)]
    pub artist: Option<PathBuf>,

    /// Genre export file
    #[arg(long)]
    pub genre: Option<PathBuf>,

    /// Artist-to-genre link export file
    #[arg(long)]
    pub artist_genre: Option<PathBuf>,

    /// Rows per INSERT statement
    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Ignore lines starting with this prefix ("" disables)
    #[arg(long)]
    pub skip_prefix: Option<String>,

    /// Fail a file when its final batch cannot be stored
    #[arg(long)]
    pub strict_drain: bool,
}

pub fn run(args: LoadArgs, config: &Config, progress: &ProgressContext) -> Result<()> {
    let mut load = config.load_config();
    if let Some(path) = args.artist {
        load.artist = Some(path);
    }
    if let Some(path) = args.genre {
        load.genre = Some(path);
    }
    if let Some(path) = args.artist_genre {
        load.artist_genre = Some(path);
    }
    if let Some(n) = args.batch_size {
        load.processor.batch_size = n;
    }
    if let Some(prefix) = args.skip_prefix {
        load.processor.skip_prefix = prefix;
    }
    if args.strict_drain {
        load.processor.drain = DrainPolicy::Strict;
    }

    let db = args.db.unwrap_or_else(|| config.store.path.clone());
    log::info!("Opening {}", db.display());
    let mut conn = Connection::open(&db)
        .with_context(|| format!("Failed to open DuckDB database: {}", db.display()))?;

    let summary = tuneload_catalog::run(&mut conn, &load, progress)?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &Summary) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![
            Cell::new("Input").fg(Color::Cyan),
            Cell::new("Rows").fg(Color::Cyan),
            Cell::new("Batches").fg(Color::Cyan),
            Cell::new("Lines").fg(Color::Cyan),
            Cell::new("Skipped").fg(Color::Cyan),
            Cell::new("Malformed").fg(Color::Cyan),
            Cell::new("Time").fg(Color::Cyan),
        ]);

    for file in &summary.files {
        let stats = &file.stats;
        let malformed = if stats.decode_failures > 0 {
            Cell::new(fmt_num(stats.decode_failures)).fg(Color::Yellow)
        } else {
            Cell::new("0").fg(Color::DarkGrey)
        };
        let rows = if stats.input_truncated {
            Cell::new(format!("{} (input truncated)", fmt_num(stats.rows_flushed))).fg(Color::Red)
        } else if stats.drain_failed {
            Cell::new(format!("{} (last batch lost)", fmt_num(stats.rows_flushed))).fg(Color::Red)
        } else {
            Cell::new(fmt_num(stats.rows_flushed))
        };
        table.add_row(vec![
            Cell::new(file.shape),
            rows,
            Cell::new(stats.batches),
            Cell::new(fmt_num(stats.lines_read)),
            Cell::new(fmt_num(stats.lines_skipped)),
            malformed,
            Cell::new(format!("{:.1}s", stats.elapsed.as_secs_f64())),
        ]);
    }

    eprintln!("\n{table}");
    for file in summary.drain_failures() {
        eprintln!(
            "Last batch of {} ({}) was not stored",
            file.shape,
            file.path.display()
        );
    }
    for file in summary.truncated_inputs() {
        eprintln!(
            "Stopped reading {} ({}) after {} read errors",
            file.shape,
            file.path.display(),
            file.stats.read_failures
        );
    }
    eprintln!(
        "Total: {} rows in {:.1}s",
        fmt_num(summary.rows_flushed()),
        summary.elapsed.as_secs_f64()
    );
}
