//! Record decoder capability and shape-table driven field coercion

use std::marker::PhantomData;

use crate::error::DecodeError;
use crate::statement::{BulkRow, InsertTemplate};
use crate::tokenize;

/// Field separator in catalog exports (SOH)
pub const FIELD_DELIMITER: char = '\u{1}';

/// Row terminator that leaks into the last field of catalog exports (STX)
pub const ROW_TERMINATOR: char = '\u{2}';

/// Static description of one record shape: field layout and insert target.
#[derive(Debug)]
pub struct Shape {
    pub name: &'static str,
    /// Field names in file order; the arity is their count.
    pub fields: &'static [&'static str],
    pub delimiter: char,
    /// Index of the field whose trailing row terminator is stripped, if any.
    pub terminated_field: Option<usize>,
    pub terminator: char,
    pub insert: InsertTemplate,
}

impl Shape {
    pub const fn arity(&self) -> usize {
        self.fields.len()
    }

    /// Tokenize `line` against this shape, checking arity and stripping the terminator.
    pub fn tokenize<'a>(&'static self, line: &'a str) -> Result<Fields<'a>, DecodeError> {
        let mut tokens = tokenize::split(line, self.delimiter, self.arity());
        if tokens.len() != self.arity() {
            return Err(DecodeError::Arity {
                expected: self.arity(),
                found: tokens.len(),
            });
        }
        if let Some(idx) = self.terminated_field {
            tokens[idx] = tokenize::strip_trailing(tokens[idx], self.terminator);
        }
        Ok(Fields {
            shape: self,
            tokens,
        })
    }
}

/// Tokens of one line, coerced positionally on demand.
#[derive(Debug)]
pub struct Fields<'a> {
    shape: &'static Shape,
    tokens: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    fn name(&self, idx: usize) -> &'static str {
        self.shape.fields[idx]
    }

    /// Raw token, passed through verbatim.
    pub fn text(&self, idx: usize) -> &'a str {
        self.tokens[idx]
    }

    /// Strict base-10 integer.
    pub fn int(&self, idx: usize) -> Result<i64, DecodeError> {
        let raw = self.tokens[idx];
        raw.parse().map_err(|source| DecodeError::Int {
            field: self.name(idx),
            raw: raw.to_string(),
            source,
        })
    }

    /// Integer, with the empty string meaning absent.
    pub fn nullable_int(&self, idx: usize) -> Result<Option<i64>, DecodeError> {
        if self.tokens[idx].is_empty() {
            return Ok(None);
        }
        self.int(idx).map(Some)
    }

    /// Strict boolean literal.
    pub fn bool(&self, idx: usize) -> Result<bool, DecodeError> {
        let raw = self.tokens[idx];
        parse_bool(raw).ok_or_else(|| DecodeError::Bool {
            field: self.name(idx),
            raw: raw.to_string(),
        })
    }
}

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// A typed record described by a static [`Shape`].
pub trait Record: BulkRow + Sized {
    const SHAPE: &'static Shape;

    /// Coerce already-tokenized fields into the record.
    fn from_fields(fields: &Fields<'_>) -> Result<Self, DecodeError>;
}

/// Capability: turn one raw line into a record.
pub trait RecordDecoder {
    type Record: BulkRow;

    /// Shape this decoder produces, including its insert target.
    fn shape(&self) -> &'static Shape;

    fn decode(&self, line: &str) -> Result<Self::Record, DecodeError>;
}

/// Generic decoder driven entirely by `R::SHAPE`.
pub struct ShapeDecoder<R> {
    _record: PhantomData<fn() -> R>,
}

impl<R> ShapeDecoder<R> {
    pub const fn new() -> Self {
        Self {
            _record: PhantomData,
        }
    }
}

impl<R> Default for ShapeDecoder<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> std::fmt::Debug for ShapeDecoder<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShapeDecoder").finish()
    }
}

impl<R: Record> RecordDecoder for ShapeDecoder<R> {
    type Record = R;

    fn shape(&self) -> &'static Shape {
        R::SHAPE
    }

    fn decode(&self, line: &str) -> Result<R, DecodeError> {
        let fields = R::SHAPE.tokenize(line)?;
        R::from_fields(&fields)
    }
}
