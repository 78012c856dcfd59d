//! Inventory import and selection.
//!
//! This crate turns raw CSV, Bamboo and Cultivera exports into one canonical
//! item model and picks the items to print. It is deterministic domain logic
//! only (no file or network I/O).

pub mod error;
pub mod item;
pub mod normalize;
pub mod select;
pub mod source;

pub use error::{ErrorScope, ImportError, ImportWarning, NormalizationError, ParseError};
pub use item::{InventoryItem, ItemFields, SourceKind, UNCATEGORIZED};
pub use normalize::{
    CsvField, HEADER_TABLE, ImportReport, NormalizedRecord, import, normalize_batch,
    normalize_record, records,
};
pub use select::{
    CategoryGroup, SelectionSpec, categories, group_by_category, ids_in_category, select,
};
pub use source::{RawBatch, RawRecord};
