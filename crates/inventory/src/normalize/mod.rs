//! Schema normalizer: raw source records into canonical [`InventoryItem`]s.
//!
//! Dispatch is on the record's declared [`SourceKind`] (the [`RawRecord`]
//! variant), never on the shape of the data. Each source has its own pure
//! mapping function:
//!
//! - CSV: header names through [`HEADER_TABLE`]
//! - Bamboo: transfer -> `inventory_transfer_items[]`
//! - Cultivera: `data.manifest` -> `packages[]` -> `items[]`
//!
//! A record that lacks a product name is rejected on its own; a batch whose
//! record container is missing yields no items at all.

mod bamboo;
mod csv;
mod cultivera;
mod fields;

pub use self::csv::{CsvField, HEADER_TABLE};

use serde::Serialize;

use crate::error::{ImportError, ImportWarning, NormalizationError};
use crate::item::{InventoryItem, SourceKind};
use crate::source::{RawBatch, RawRecord};

/// Output of normalizing one record.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub item: InventoryItem,
    /// Raw quantity text when it was missing or unusable and became 0.
    pub quantity_coerced_from: Option<String>,
}

/// Normalize a single raw record found at position `index` of its load.
///
/// Pure: the same record and index always produce the same result.
pub fn normalize_record(
    index: usize,
    record: RawRecord<'_>,
) -> Result<NormalizedRecord, NormalizationError> {
    match record {
        RawRecord::Csv(row) => csv::map_row(index, row),
        RawRecord::Bamboo { transfer, line } => bamboo::map_line(index, transfer, line),
        RawRecord::Cultivera {
            manifest,
            package_category,
            item,
        } => cultivera::map_item(index, manifest, package_category, item),
    }
}

/// Flatten a batch into its records, in source order.
///
/// Fails when the structure holding the records is absent, since then no
/// record can be produced.
pub fn records(batch: &RawBatch) -> Result<Vec<RawRecord<'_>>, NormalizationError> {
    match batch {
        RawBatch::Csv(table) => {
            csv::check_headers(&table.headers)?;
            Ok(table.rows.iter().map(RawRecord::Csv).collect())
        }
        RawBatch::Bamboo(transfer) => bamboo::records(transfer),
        RawBatch::Cultivera(document) => cultivera::records(document),
    }
}

/// Result of normalizing one batch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportReport {
    pub kind: SourceKind,
    /// Normalized items in source order.
    pub items: Vec<InventoryItem>,
    /// Records that could not be normalized. Other records are unaffected.
    pub rejected: Vec<NormalizationError>,
    pub warnings: Vec<ImportWarning>,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty() && self.warnings.is_empty()
    }
}

/// Normalize every record of `batch`.
///
/// Per-record failures are collected in [`ImportReport::rejected`]; only a
/// batch-level failure returns `Err`.
pub fn normalize_batch(batch: &RawBatch) -> Result<ImportReport, NormalizationError> {
    let kind = batch.kind();
    let records = records(batch).inspect_err(|err| {
        tracing::warn!(source = %kind, error = %err, "batch rejected");
    })?;

    let mut report = ImportReport {
        kind,
        items: Vec::with_capacity(records.len()),
        rejected: Vec::new(),
        warnings: Vec::new(),
    };

    for (index, record) in records.into_iter().enumerate() {
        match normalize_record(index, record) {
            Ok(NormalizedRecord {
                item,
                quantity_coerced_from,
            }) => {
                if let Some(raw) = quantity_coerced_from {
                    let warning = ImportWarning::QuantityCoerced {
                        item_id: item.id_typed().clone(),
                        kind,
                        record_index: index,
                        raw,
                    };
                    tracing::warn!(%warning, "quantity coerced");
                    report.warnings.push(warning);
                }
                report.items.push(item);
            }
            Err(err) => {
                tracing::warn!(error = %err, "record rejected");
                report.rejected.push(err);
            }
        }
    }

    tracing::debug!(
        source = %kind,
        items = report.items.len(),
        rejected = report.rejected.len(),
        warnings = report.warnings.len(),
        "batch normalized"
    );
    Ok(report)
}

/// Decode and normalize `bytes` declared as `kind` in one call.
pub fn import(kind: SourceKind, bytes: &[u8]) -> Result<ImportReport, ImportError> {
    let batch = RawBatch::parse(kind, bytes)?;
    Ok(normalize_batch(&batch)?)
}
