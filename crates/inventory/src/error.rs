//! Import error and warning model.

use serde::Serialize;
use thiserror::Error;

use slipgen_core::ItemId;

use crate::item::SourceKind;

/// Raw bytes could not be read as records of the declared source kind.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed csv input: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed {kind} json: {error}")]
    Json {
        kind: SourceKind,
        #[source]
        error: serde_json::Error,
    },
}

/// Where a normalization failure applies.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "scope", content = "index")]
pub enum ErrorScope {
    /// The whole batch is unusable; no items were produced.
    Batch,
    /// Only the record at this position was rejected.
    Record(usize),
}

impl core::fmt::Display for ErrorScope {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ErrorScope::Batch => f.write_str("batch"),
            ErrorScope::Record(index) => write!(f, "record {index}"),
        }
    }
}

/// A raw record (or a whole batch) could not yield a canonical item.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{kind} {scope}: `{field}` {reason}")]
pub struct NormalizationError {
    pub kind: SourceKind,
    pub scope: ErrorScope,
    /// Name of the missing or invalid field, as spelled in the source schema.
    pub field: String,
    pub reason: String,
}

impl NormalizationError {
    pub fn batch(kind: SourceKind, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            kind,
            scope: ErrorScope::Batch,
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn record(
        kind: SourceKind,
        index: usize,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            scope: ErrorScope::Record(index),
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn record_index(&self) -> Option<usize> {
        match self.scope {
            ErrorScope::Batch => None,
            ErrorScope::Record(index) => Some(index),
        }
    }

    pub fn is_batch_level(&self) -> bool {
        self.scope == ErrorScope::Batch
    }
}

/// Failure of the one-call `import` entry point.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Normalization(#[from] NormalizationError),
}

/// Recoverable import problem, reported alongside the produced items.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "warning")]
pub enum ImportWarning {
    /// A quantity was missing or not a non-negative number and became 0.
    QuantityCoerced {
        item_id: ItemId,
        kind: SourceKind,
        record_index: usize,
        raw: String,
    },
}

impl core::fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ImportWarning::QuantityCoerced {
                item_id,
                kind,
                record_index,
                raw,
            } if raw.is_empty() => write!(
                f,
                "{kind} record {record_index} ({item_id}): missing quantity, using 0"
            ),
            ImportWarning::QuantityCoerced {
                item_id,
                kind,
                record_index,
                raw,
            } => write!(
                f,
                "{kind} record {record_index} ({item_id}): quantity `{raw}` is not a non-negative number, using 0"
            ),
        }
    }
}
