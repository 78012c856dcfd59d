//! CSV rows: header names map to canonical fields through a fixed table.

use slipgen_core::ItemId;

use super::NormalizedRecord;
use super::fields::{
    accepted_date, percent, quantity_from_text, required_product_name, split_vendor,
};
use crate::error::NormalizationError;
use crate::item::{InventoryItem, ItemFields, SourceKind};
use crate::source::CsvRow;

/// Canonical field a CSV column can feed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CsvField {
    ProductName,
    Quantity,
    Barcode,
    Category,
    Vendor,
    StrainName,
    AcceptedDate,
    ThcContent,
    CbdContent,
}

/// Recognised header spellings per field. Matching ignores case and
/// surrounding whitespace; unrecognised columns are ignored.
pub const HEADER_TABLE: &[(CsvField, &[&str])] = &[
    (CsvField::ProductName, &["Product Name*", "Product Name", "Product"]),
    (
        CsvField::Quantity,
        &["Quantity Received*", "Quantity Received", "Quantity*", "Quantity", "Qty"],
    ),
    (CsvField::Barcode, &["Barcode*", "Barcode", "Lot Number*", "Lot Number"]),
    (
        CsvField::Category,
        &["Product Type*", "Product Type", "Inventory Type", "Category"],
    ),
    (CsvField::Vendor, &["Vendor"]),
    (CsvField::StrainName, &["Strain Name", "Strain"]),
    (CsvField::AcceptedDate, &["Accepted Date"]),
    (CsvField::ThcContent, &["THC Content", "THC"]),
    (CsvField::CbdContent, &["CBD Content", "CBD"]),
];

impl CsvField {
    pub fn for_header(header: &str) -> Option<CsvField> {
        let header = header.trim();
        HEADER_TABLE
            .iter()
            .find(|(_, names)| names.iter().any(|n| n.eq_ignore_ascii_case(header)))
            .map(|(field, _)| *field)
    }
}

/// Leftmost column feeding `field`, with its header as spelled in the file.
fn column<'a>(row: &'a CsvRow, field: CsvField) -> Option<(&'a str, &'a str)> {
    row.cells()
        .iter()
        .find(|(header, _)| CsvField::for_header(header) == Some(field))
        .map(|(header, value)| (header.as_str(), value.as_str()))
}

fn text(row: &CsvRow, field: CsvField) -> String {
    column(row, field)
        .map(|(_, value)| value.trim().to_string())
        .unwrap_or_default()
}

/// A file without any product-name column cannot produce a single item.
pub(super) fn check_headers(headers: &[String]) -> Result<(), NormalizationError> {
    if headers
        .iter()
        .any(|h| CsvField::for_header(h) == Some(CsvField::ProductName))
    {
        return Ok(());
    }
    Err(NormalizationError::batch(
        SourceKind::Csv,
        "Product Name",
        "column is missing (expected `Product Name*`, `Product Name` or `Product`)",
    ))
}

pub(super) fn map_row(index: usize, row: &CsvRow) -> Result<NormalizedRecord, NormalizationError> {
    let (name_header, name) = match column(row, CsvField::ProductName) {
        Some((header, value)) => (header, Some(value)),
        None => ("Product Name", None),
    };
    let product_name = required_product_name(SourceKind::Csv, index, name_header, name)?;

    let quantity = quantity_from_text(column(row, CsvField::Quantity).map(|(_, v)| v));
    let (vendor_license, vendor) = split_vendor(&text(row, CsvField::Vendor));

    let fields = ItemFields {
        product_name,
        strain_name: text(row, CsvField::StrainName),
        vendor,
        vendor_license,
        barcode: text(row, CsvField::Barcode),
        quantity: quantity.value,
        category: text(row, CsvField::Category),
        accepted_date: accepted_date(&text(row, CsvField::AcceptedDate)),
        thc_content: percent(&text(row, CsvField::ThcContent)),
        cbd_content: percent(&text(row, CsvField::CbdContent)),
    };

    Ok(NormalizedRecord {
        item: InventoryItem::new(
            ItemId::positional(SourceKind::Csv.as_str(), index),
            SourceKind::Csv,
            fields,
        ),
        quantity_coerced_from: quantity.coerced_from,
    })
}
