use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use slipgen_core::{DomainError, Entity, ItemId};

/// Category assigned when a source provides none.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Origin schema of an imported record.
///
/// Retained on every item for diagnostics only; layout never branches on it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Csv,
    Bamboo,
    Cultivera,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [SourceKind::Csv, SourceKind::Bamboo, SourceKind::Cultivera];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Csv => "csv",
            SourceKind::Bamboo => "bamboo",
            SourceKind::Cultivera => "cultivera",
        }
    }
}

impl core::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for SourceKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                DomainError::validation(format!(
                    "unknown source kind `{wanted}` (expected csv, bamboo or cultivera)"
                ))
            })
    }
}

/// Field values extracted from a raw record, before canonicalisation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemFields {
    pub product_name: String,
    pub strain_name: String,
    pub vendor: String,
    pub vendor_license: String,
    pub barcode: String,
    pub quantity: f64,
    pub category: String,
    pub accepted_date: Option<NaiveDate>,
    pub thc_content: String,
    pub cbd_content: String,
}

/// Canonical inventory item.
///
/// Immutable once built: fields are private and only exposed through
/// accessors. Every text field holds a (possibly empty) trimmed string,
/// `quantity` is finite and non-negative, and `category` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryItem {
    id: ItemId,
    product_name: String,
    strain_name: String,
    vendor: String,
    vendor_license: String,
    barcode: String,
    quantity: f64,
    category: String,
    accepted_date: Option<NaiveDate>,
    thc_content: String,
    cbd_content: String,
    raw_source: SourceKind,
}

impl InventoryItem {
    pub fn new(id: ItemId, raw_source: SourceKind, fields: ItemFields) -> Self {
        let quantity = if fields.quantity.is_finite() && fields.quantity > 0.0 {
            fields.quantity
        } else {
            0.0
        };

        let category = fields.category.trim();
        let category = if category.is_empty() {
            UNCATEGORIZED.to_string()
        } else {
            category.to_string()
        };

        Self {
            id,
            product_name: fields.product_name.trim().to_string(),
            strain_name: fields.strain_name.trim().to_string(),
            vendor: fields.vendor.trim().to_string(),
            vendor_license: fields.vendor_license.trim().to_string(),
            barcode: fields.barcode.trim().to_string(),
            quantity,
            category,
            accepted_date: fields.accepted_date,
            thc_content: fields.thc_content.trim().to_string(),
            cbd_content: fields.cbd_content.trim().to_string(),
            raw_source,
        }
    }

    pub fn id_typed(&self) -> &ItemId {
        &self.id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn strain_name(&self) -> &str {
        &self.strain_name
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn vendor_license(&self) -> &str {
        &self.vendor_license
    }

    pub fn barcode(&self) -> &str {
        &self.barcode
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    /// Quantity as printed on a slip (`5`, `3.5`).
    pub fn quantity_display(&self) -> String {
        self.quantity.to_string()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn accepted_date(&self) -> Option<NaiveDate> {
        self.accepted_date
    }

    pub fn thc_content(&self) -> &str {
        &self.thc_content
    }

    pub fn cbd_content(&self) -> &str {
        &self.cbd_content
    }

    pub fn raw_source(&self) -> SourceKind {
        self.raw_source
    }

    /// Fields matched by free-text search.
    pub fn searchable_fields(&self) -> [&str; 4] {
        [
            &self.product_name,
            &self.strain_name,
            &self.vendor,
            &self.barcode,
        ]
    }
}

impl Entity for InventoryItem {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str) -> ItemFields {
        ItemFields {
            product_name: name.to_string(),
            ..ItemFields::default()
        }
    }

    #[test]
    fn new_trims_text_and_defaults_category() {
        let item = InventoryItem::new(
            ItemId::positional("csv", 0),
            SourceKind::Csv,
            ItemFields {
                vendor: "  Green Farms ".to_string(),
                category: "   ".to_string(),
                ..fields("  Blue Dream 3.5g ")
            },
        );

        assert_eq!(item.product_name(), "Blue Dream 3.5g");
        assert_eq!(item.vendor(), "Green Farms");
        assert_eq!(item.category(), UNCATEGORIZED);
        assert_eq!(item.strain_name(), "");
    }

    #[test]
    fn new_clamps_invalid_quantities_to_zero() {
        for bad in [-3.0, f64::NAN, f64::INFINITY, -0.0] {
            let item = InventoryItem::new(
                ItemId::positional("csv", 0),
                SourceKind::Csv,
                ItemFields {
                    quantity: bad,
                    ..fields("x")
                },
            );
            assert_eq!(item.quantity(), 0.0);
            assert_eq!(item.quantity_display(), "0");
        }
    }

    #[test]
    fn quantity_display_drops_trailing_zeroes() {
        let whole = InventoryItem::new(
            ItemId::positional("csv", 0),
            SourceKind::Csv,
            ItemFields {
                quantity: 12.0,
                ..fields("x")
            },
        );
        let fractional = InventoryItem::new(
            ItemId::positional("csv", 1),
            SourceKind::Csv,
            ItemFields {
                quantity: 3.5,
                ..fields("y")
            },
        );

        assert_eq!(whole.quantity_display(), "12");
        assert_eq!(fractional.quantity_display(), "3.5");
    }

    #[test]
    fn source_kind_parses_case_insensitively() {
        assert_eq!("Bamboo".parse::<SourceKind>().unwrap(), SourceKind::Bamboo);
        assert_eq!(" csv ".parse::<SourceKind>().unwrap(), SourceKind::Csv);
        assert!(matches!(
            "growflow".parse::<SourceKind>(),
            Err(DomainError::Validation(_))
        ));
    }
}
