//! Capacity-bounded batch buffer with flush-on-full semantics

use crate::error::{FlushError, IngestError};
use crate::statement::{self, BulkRow, InsertTemplate};
use crate::store::Store;

/// Default number of rows per bulk insert.
pub const DEFAULT_BATCH_SIZE: usize = 5000;

/// Ordered, append-only batch of decoded rows awaiting one bulk insert.
///
/// Storage is allocated at full capacity on the first push and reused
/// across flushes.
#[derive(Debug)]
pub struct BatchBuffer<R> {
    capacity: usize,
    rows: Option<Vec<R>>,
}

impl<R: BulkRow> BatchBuffer<R> {
    pub const fn new(capacity: usize) -> Self {
        Self {
            capacity,
            rows: None,
        }
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of rows currently buffered
    pub fn len(&self) -> usize {
        self.rows.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if buffer has reached capacity and is due for a flush
    pub fn is_full(&self) -> bool {
        self.len() >= self.capacity
    }

    /// Append a row, allocating storage on first use.
    ///
    /// Fails with [`IngestError::Config`] if the capacity is zero.
    pub fn push(&mut self, row: R) -> Result<(), IngestError> {
        if self.rows.is_none() && self.capacity == 0 {
            return Err(IngestError::Config {
                capacity: self.capacity,
            });
        }
        let capacity = self.capacity;
        self.rows
            .get_or_insert_with(|| Vec::with_capacity(capacity))
            .push(row);
        Ok(())
    }

    /// Execute one bulk insert over the buffered rows if due.
    ///
    /// Returns `Ok(None)` when empty, or when below capacity and not forced.
    /// Otherwise the buffer is cleared whatever the outcome, and the result is
    /// `Ok(Some(rows))` or the error of that single attempt. A store error
    /// carries the first row's parameters so the rejected batch can be found.
    pub fn flush<S: Store + ?Sized>(
        &mut self,
        template: &InsertTemplate,
        store: &mut S,
        force: bool,
    ) -> Result<Option<usize>, FlushError> {
        if self.is_empty() || (!self.is_full() && !force) {
            return Ok(None);
        }
        let Some(rows) = self.rows.as_mut() else {
            return Ok(None);
        };

        let count = rows.len();
        let built = statement::build(template, rows);
        rows.clear();

        let stmt = built.map_err(|source| FlushError::Statement {
            rows: count,
            source,
        })?;
        store
            .execute(&stmt.sql, &stmt.params)
            .map_err(|source| FlushError::Store {
                rows: count,
                first: stmt.params[..template.width()].to_vec(),
                source,
            })?;
        Ok(Some(count))
    }
}
