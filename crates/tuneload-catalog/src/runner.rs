//! Load all configured export files into the store, one file at a time.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use duckdb::Connection;
use tuneload_core::{
    LogRunLog, ProcessorConfig, ProgressContext, Record, RunStats, ShapeDecoder, Store,
    StreamProcessor, fmt_num, open_input,
};

use crate::config::LoadConfig;
use crate::schema;
use crate::{Artist, ArtistGenreLink, Genre};

/// Result of loading one export file.
#[derive(Debug, Clone)]
pub struct FileSummary {
    /// Shape name (`artist`, `genre`, `artist_genre`)
    pub shape: &'static str,
    pub path: PathBuf,
    pub stats: RunStats,
}

/// Summary statistics from a catalog load.
#[derive(Debug, Default)]
pub struct Summary {
    pub files: Vec<FileSummary>,
    pub elapsed: Duration,
}

impl Summary {
    pub fn rows_flushed(&self) -> usize {
        self.files.iter().map(|f| f.stats.rows_flushed).sum()
    }

    pub fn decode_failures(&self) -> usize {
        self.files.iter().map(|f| f.stats.decode_failures).sum()
    }

    /// Files whose final batch was dropped under the lenient drain policy
    pub fn drain_failures(&self) -> impl Iterator<Item = &FileSummary> {
        self.files.iter().filter(|f| f.stats.drain_failed)
    }

    /// Files abandoned part way after repeated read errors
    pub fn truncated_inputs(&self) -> impl Iterator<Item = &FileSummary> {
        self.files.iter().filter(|f| f.stats.input_truncated)
    }
}

/// Create the schema and load artist, genre, then link files.
///
/// A fatal error in one file stops the load; files already loaded stay
/// committed.
pub fn run(conn: &mut Connection, config: &LoadConfig, progress: &ProgressContext) -> Result<Summary> {
    config.validate()?;
    schema::create_all(conn)?;

    let start = Instant::now();
    let mut summary = Summary::default();

    match &config.artist {
        Some(path) => summary
            .files
            .push(load_file::<Artist, _>(conn, path, &config.processor, progress)?),
        None => log::info!("artist: no input configured, skipping"),
    }
    match &config.genre {
        Some(path) => summary
            .files
            .push(load_file::<Genre, _>(conn, path, &config.processor, progress)?),
        None => log::info!("genre: no input configured, skipping"),
    }
    match &config.artist_genre {
        Some(path) => summary.files.push(load_file::<ArtistGenreLink, _>(
            conn,
            path,
            &config.processor,
            progress,
        )?),
        None => log::info!("artist_genre: no input configured, skipping"),
    }

    summary.elapsed = start.elapsed();
    log::info!(
        "Load complete: {} rows from {} files in {:.1}s",
        fmt_num(summary.rows_flushed()),
        summary.files.len(),
        summary.elapsed.as_secs_f64()
    );
    Ok(summary)
}

/// Stream one export file of record type `R` into `store`.
pub fn load_file<R, S>(
    store: &mut S,
    path: &Path,
    config: &ProcessorConfig,
    progress: &ProgressContext,
) -> Result<FileSummary>
where
    R: Record,
    S: Store + ?Sized,
{
    let shape = R::SHAPE;
    log::info!("Parsing {} file {}", shape.name, path.display());

    let pb = progress.file_bar(shape.name);
    let mut reader = open_input(path, &pb)
        .with_context(|| format!("Failed to open {} input", shape.name))?;

    let mut processor = StreamProcessor::new(ShapeDecoder::<R>::new(), config)
        .with_log(Box::new(LogRunLog::new(shape.name)))
        .with_progress(pb.clone());
    let result = processor.process(&mut reader, store);
    pb.finish_and_clear();
    let stats = result.with_context(|| format!("Failed to load {}", path.display()))?;

    log::info!(
        "{}: {} rows in {} batches ({} lines, {} skipped, {} malformed) in {:.1}s",
        shape.name,
        fmt_num(stats.rows_flushed),
        stats.batches,
        fmt_num(stats.lines_read),
        fmt_num(stats.lines_skipped),
        fmt_num(stats.decode_failures),
        stats.elapsed.as_secs_f64()
    );
    if stats.drain_failed {
        log::warn!("{}: final batch was not stored", shape.name);
    }
    if stats.input_truncated {
        log::warn!(
            "{}: stopped reading {} after {} read errors, remaining lines not loaded",
            shape.name,
            path.display(),
            stats.read_failures
        );
    }

    Ok(FileSummary {
        shape: shape.name,
        path: path.to_path_buf(),
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(shape: &'static str, stats: RunStats) -> FileSummary {
        FileSummary {
            shape,
            path: PathBuf::from(shape),
            stats,
        }
    }

    #[test]
    fn summary_totals_and_problem_files() {
        let summary = Summary {
            files: vec![
                file(
                    "artist",
                    RunStats {
                        rows_flushed: 10,
                        decode_failures: 1,
                        drain_failed: true,
                        ..RunStats::default()
                    },
                ),
                file(
                    "genre",
                    RunStats {
                        rows_flushed: 5,
                        read_failures: 16,
                        input_truncated: true,
                        ..RunStats::default()
                    },
                ),
                file("artist_genre", RunStats::default()),
            ],
            elapsed: Duration::ZERO,
        };

        assert_eq!(summary.rows_flushed(), 15);
        assert_eq!(summary.decode_failures(), 1);
        let drained: Vec<_> = summary.drain_failures().map(|f| f.shape).collect();
        assert_eq!(drained, ["artist"]);
        let truncated: Vec<_> = summary.truncated_inputs().map(|f| f.shape).collect();
        assert_eq!(truncated, ["genre"]);
    }
}
