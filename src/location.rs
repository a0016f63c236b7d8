//! Source locations
//!
//! Two immutable value types: a single point in a named input and a
//! contiguous range within one input. Ranges are produced from two points
//! by subtraction (`&start - &end`), covering `[start, end)`.

use std::fmt;
use std::ops::Sub;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A single `(file, line, column)` position; lines and columns are 1-based.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourcePos {
    pub filename: Arc<str>,
    pub line: u32,
    pub column: u32,
}

impl SourcePos {
    pub fn new(filename: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        Self {
            filename: filename.into(),
            line,
            column,
        }
    }

    /// The range `[self, end)`, if both points are in the same file and
    /// `self` does not come after `end`.
    pub fn span_to(&self, end: &SourcePos) -> Option<SourceSpan> {
        if self.filename != end.filename || (self.line, self.column) > (end.line, end.column) {
            return None;
        }
        Some(SourceSpan {
            filename: Arc::clone(&self.filename),
            start_line: self.line,
            start_column: self.column,
            end_line: end.line,
            end_column: end.column - 1,
        })
    }
}

impl fmt::Display for SourcePos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line, self.column)
    }
}

impl Sub for &SourcePos {
    type Output = SourceSpan;

    /// Unchecked form of [`SourcePos::span_to`]; the end column saturates at 0.
    fn sub(self, end: &SourcePos) -> SourceSpan {
        debug_assert!(self.filename == end.filename);
        debug_assert!((self.line, self.column) <= (end.line, end.column));
        SourceSpan {
            filename: Arc::clone(&self.filename),
            start_line: self.line,
            start_column: self.column,
            end_line: end.line,
            end_column: end.column.saturating_sub(1),
        }
    }
}

/// A contiguous range of one input, both ends inclusive.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceSpan {
    pub filename: Arc<str>,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl SourceSpan {
    pub fn new(
        filename: impl Into<Arc<str>>,
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
    ) -> Self {
        Self {
            filename: filename.into(),
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    pub fn start(&self) -> SourcePos {
        SourcePos {
            filename: Arc::clone(&self.filename),
            line: self.start_line,
            column: self.start_column,
        }
    }
}

impl fmt::Display for SourceSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start_line == self.end_line {
            write!(
                f,
                "{}:{}:{}-{}",
                self.filename, self.start_line, self.start_column, self.end_column
            )
        } else {
            write!(
                f,
                "{}:{}:{}-{}:{}",
                self.filename, self.start_line, self.start_column, self.end_line, self.end_column
            )
        }
    }
}
