//! Tuneload Core - batched bulk loading of delimiter-separated exports
//!
//! A line stream is skip-filtered, decoded record by record through a
//! [`RecordDecoder`], buffered in a [`BatchBuffer`], and flushed to a
//! [`Store`] as one multi-row INSERT per batch.

pub mod buffer;
pub mod decode;
pub mod error;
pub mod input;
pub mod logging;
pub mod processor;
pub mod progress;
pub mod statement;
pub mod store;
pub mod tokenize;

// Re-exports for convenience
pub use buffer::{BatchBuffer, DEFAULT_BATCH_SIZE};
pub use decode::{
    FIELD_DELIMITER, Fields, ROW_TERMINATOR, Record, RecordDecoder, Shape, ShapeDecoder,
};
pub use error::{DecodeError, FlushError, IngestError, StoreError, TemplateError};
pub use input::{InputReader, open_input};
pub use logging::{IndicatifLogger, LogRunLog, RunLog, init_logging};
pub use processor::{DrainPolicy, ProcessorConfig, RunStats, StreamProcessor};
pub use progress::{ProgressContext, fmt_num};
pub use statement::{BulkRow, BulkStatement, InsertTemplate};
pub use store::{Param, Store};
