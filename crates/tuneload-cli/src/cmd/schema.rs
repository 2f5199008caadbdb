//! Schema subcommand - create catalog tables without loading

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use duckdb::Connection;

use crate::config::Config;

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// DuckDB database file (default from config: music.duckdb)
    #[arg(long)]
    pub db: Option<PathBuf>,
}

pub fn run(args: SchemaArgs, config: &Config) -> Result<()> {
    let db = args.db.unwrap_or_else(|| config.store.path.clone());
    let conn = Connection::open(&db)
        .with_context(|| format!("Failed to open DuckDB database: {}", db.display()))?;

    tuneload_catalog::schema::create_all(&conn)?;
    log::info!("Schema ready in {}", db.display());
    Ok(())
}
