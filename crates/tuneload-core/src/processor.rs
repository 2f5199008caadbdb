//! Stream processor: read line → skip filter → decode → buffer → flush.
//!
//! Per-line problems (read errors, malformed rows) are written to the run
//! log and skipped. A store failure mid-stream ends the run. The final
//! forced flush at end of input follows the configured [`DrainPolicy`].

use std::io::BufRead;
use std::time::{Duration, Instant};

use indicatif::ProgressBar;

use crate::buffer::{BatchBuffer, DEFAULT_BATCH_SIZE};
use crate::decode::RecordDecoder;
use crate::error::{FlushError, IngestError};
use crate::logging::RunLog;
use crate::progress::fmt_num;
use crate::store::Store;

/// Initial capacity for the per-line read buffer
const LINE_BUF_CAPACITY: usize = 4096;

/// Progress update interval (every N lines to avoid overhead)
const UPDATE_INTERVAL: usize = 10_000;

/// Consecutive read failures after which the input is treated as exhausted
const MAX_CONSECUTIVE_READ_ERRORS: usize = 16;

/// What a failed final flush at end of input does to the run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrainPolicy {
    /// Log the failure and still report success (see [`RunStats::drain_failed`]).
    #[default]
    Lenient,
    /// Fail the run, same as a mid-stream flush failure.
    Strict,
}

/// Processor settings shared by every record shape.
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub batch_size: usize,
    /// Lines starting with this (compared per code point) are ignored.
    /// Empty disables prefix skipping.
    pub skip_prefix: String,
    pub drain: DrainPolicy,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            skip_prefix: "#".to_string(),
            drain: DrainPolicy::Lenient,
        }
    }
}

/// Outcome counters for one run over one input stream
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub lines_read: usize,
    pub lines_skipped: usize,
    pub read_failures: usize,
    pub decode_failures: usize,
    pub rows_flushed: usize,
    pub batches: usize,
    /// Final forced flush failed under [`DrainPolicy::Lenient`]; its rows were not stored.
    pub drain_failed: bool,
    /// Reading stopped after repeated read errors; the rest of the input was not loaded.
    pub input_truncated: bool,
    pub elapsed: Duration,
}

/// Drives one decoder and its batch buffer over a line stream.
pub struct StreamProcessor<D: RecordDecoder> {
    decoder: D,
    buffer: BatchBuffer<D::Record>,
    skip_prefix: String,
    drain: DrainPolicy,
    log: Option<Box<dyn RunLog>>,
    pb: ProgressBar,
}

impl<D: RecordDecoder> StreamProcessor<D> {
    pub fn new(decoder: D, config: &ProcessorConfig) -> Self {
        Self {
            decoder,
            buffer: BatchBuffer::new(config.batch_size),
            skip_prefix: config.skip_prefix.clone(),
            drain: config.drain,
            log: None,
            pb: ProgressBar::hidden(),
        }
    }

    /// Send per-line and per-batch failures to `log`.
    pub fn with_log(mut self, log: Box<dyn RunLog>) -> Self {
        self.log = Some(log);
        self
    }

    /// Report line/row counts on `pb`.
    pub fn with_progress(mut self, pb: ProgressBar) -> Self {
        self.pb = pb;
        self
    }

    /// Run the pipeline over `input`, inserting into `store`.
    pub fn process<R, S>(&mut self, input: &mut R, store: &mut S) -> Result<RunStats, IngestError>
    where
        R: BufRead + ?Sized,
        S: Store + ?Sized,
    {
        let start = Instant::now();
        let shape = self.decoder.shape();
        let mut stats = RunStats::default();
        let mut raw = Vec::with_capacity(LINE_BUF_CAPACITY);
        let mut line_no = 0usize;
        let mut consecutive_read_errors = 0usize;

        log::debug!("{}: reading input, batch size {}", shape.name, self.buffer.capacity());
        loop {
            raw.clear();
            match input.read_until(b'\n', &mut raw) {
                Ok(0) => break,
                Ok(_) => {
                    line_no += 1;
                    consecutive_read_errors = 0;
                }
                Err(source) => {
                    line_no += 1;
                    stats.read_failures += 1;
                    consecutive_read_errors += 1;
                    self.log(&IngestError::Read {
                        line: line_no,
                        source,
                    }
                    .to_string());
                    if consecutive_read_errors >= MAX_CONSECUTIVE_READ_ERRORS {
                        self.log(&format!(
                            "giving up on input after {consecutive_read_errors} consecutive read errors"
                        ));
                        stats.input_truncated = true;
                        break;
                    }
                    continue;
                }
            }
            stats.lines_read += 1;

            if stats.lines_read.is_multiple_of(UPDATE_INTERVAL) {
                self.pb.set_message(format!(
                    "{} lines, {} rows",
                    fmt_num(stats.lines_read),
                    fmt_num(stats.rows_flushed + self.buffer.len())
                ));
            }

            let line = String::from_utf8_lossy(trim_line_ending(&raw));
            if self.should_skip(&line) {
                stats.lines_skipped += 1;
                continue;
            }

            let record = match self.decoder.decode(&line) {
                Ok(record) => record,
                Err(source) => {
                    stats.decode_failures += 1;
                    let err = IngestError::Decode {
                        line: line_no,
                        source,
                    };
                    self.log(&format!("{err} in {line:?}"));
                    continue;
                }
            };
            self.buffer.push(record)?;

            match self.buffer.flush(&shape.insert, store, false) {
                Ok(Some(rows)) => self.record_flush(&mut stats, rows),
                Ok(None) => {}
                Err(source) => {
                    let err = IngestError::Flush {
                        line: line_no,
                        source,
                    };
                    self.log(&err.to_string());
                    return Err(err);
                }
            }
        }

        match self.buffer.flush(&shape.insert, store, true) {
            Ok(Some(rows)) => self.record_flush(&mut stats, rows),
            Ok(None) => {}
            Err(source) => self.fail_drain(&mut stats, line_no, source)?,
        }

        stats.elapsed = start.elapsed();
        Ok(stats)
    }

    fn record_flush(&mut self, stats: &mut RunStats, rows: usize) {
        stats.batches += 1;
        stats.rows_flushed += rows;
        log::info!(
            "{}: batch #{} inserted ({} rows, {} total)",
            self.decoder.shape().name,
            stats.batches,
            fmt_num(rows),
            fmt_num(stats.rows_flushed)
        );
    }

    fn fail_drain(
        &mut self,
        stats: &mut RunStats,
        line_no: usize,
        source: FlushError,
    ) -> Result<(), IngestError> {
        let err = IngestError::Flush {
            line: line_no,
            source,
        };
        self.log(&err.to_string());
        match self.drain {
            DrainPolicy::Strict => Err(err),
            DrainPolicy::Lenient => {
                stats.drain_failed = true;
                Ok(())
            }
        }
    }

    /// Empty lines and lines starting with the skip prefix are dropped silently.
    fn should_skip(&self, line: &str) -> bool {
        line.is_empty() || (!self.skip_prefix.is_empty() && line.starts_with(&self.skip_prefix))
    }

    fn log(&mut self, msg: &str) {
        if let Some(log) = self.log.as_mut() {
            log.write(msg);
        }
    }
}

/// Strip a trailing `\n` or `\r\n`
fn trim_line_ending(raw: &[u8]) -> &[u8] {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    raw.strip_suffix(b"\r").unwrap_or(raw)
}
