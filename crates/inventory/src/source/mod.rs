//! Source parsers: raw bytes into raw, source-shaped records.
//!
//! Parsers only decode. They do not validate required fields or coerce
//! values; that is the normalizer's job.

pub mod bamboo;
pub mod csv;
pub mod cultivera;

pub use self::bamboo::{BambooLine, BambooTransfer, LabResultData, Potency};
pub use self::csv::{CsvRow, CsvTable};
pub use self::cultivera::{
    CultiveraData, CultiveraDocument, CultiveraItem, CultiveraLicense, CultiveraManifest,
    CultiveraPackage, CultiveraProduct, CultiveraTestResult,
};

use crate::error::ParseError;
use crate::item::SourceKind;

/// One decoded input batch, tagged by its declared source kind.
#[derive(Debug, Clone, PartialEq)]
pub enum RawBatch {
    Csv(CsvTable),
    Bamboo(BambooTransfer),
    Cultivera(CultiveraDocument),
}

impl RawBatch {
    /// Decode `bytes` as the declared source kind.
    pub fn parse(kind: SourceKind, bytes: &[u8]) -> Result<Self, ParseError> {
        match kind {
            SourceKind::Csv => csv::parse_csv(bytes).map(RawBatch::Csv),
            SourceKind::Bamboo => bamboo::parse_bamboo(bytes).map(RawBatch::Bamboo),
            SourceKind::Cultivera => cultivera::parse_cultivera(bytes).map(RawBatch::Cultivera),
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            RawBatch::Csv(_) => SourceKind::Csv,
            RawBatch::Bamboo(_) => SourceKind::Bamboo,
            RawBatch::Cultivera(_) => SourceKind::Cultivera,
        }
    }
}

/// One raw record plus the batch-level context its source schema shares
/// across records (vendor, dates, package category).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawRecord<'a> {
    Csv(&'a CsvRow),
    Bamboo {
        transfer: &'a BambooTransfer,
        line: &'a BambooLine,
    },
    Cultivera {
        manifest: &'a CultiveraManifest,
        package_category: Option<&'a str>,
        item: &'a CultiveraItem,
    },
}

impl RawRecord<'_> {
    pub fn kind(&self) -> SourceKind {
        match self {
            RawRecord::Csv(_) => SourceKind::Csv,
            RawRecord::Bamboo { .. } => SourceKind::Bamboo,
            RawRecord::Cultivera { .. } => SourceKind::Cultivera,
        }
    }
}

/// Render a loosely-typed JSON scalar as trimmed text.
///
/// Upstream systems send ids and license numbers as either strings or numbers.
pub(crate) fn json_text(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.trim().to_string(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
