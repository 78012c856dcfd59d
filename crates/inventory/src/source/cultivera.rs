//! Cultivera manifest documents.
//!
//! Shape: `data.manifest.packages[].items[]`, with the product category on
//! the package. Older exports list `data.manifest.items[]` directly.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ParseError;
use crate::item::SourceKind;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CultiveraDocument {
    pub data: Option<CultiveraData>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CultiveraData {
    pub manifest: Option<CultiveraManifest>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CultiveraManifest {
    pub from_license: Option<CultiveraLicense>,
    pub created_at: Option<String>,
    pub packages: Option<Vec<CultiveraPackage>>,
    pub items: Option<Vec<CultiveraItem>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CultiveraLicense {
    pub name: Option<String>,
    pub license_number: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CultiveraPackage {
    pub category: Option<String>,
    pub product_type: Option<String>,
    #[serde(default)]
    pub items: Vec<CultiveraItem>,
}

impl CultiveraPackage {
    /// Package-level category, preferring `category` over `product_type`.
    pub fn category(&self) -> Option<&str> {
        [self.category.as_deref(), self.product_type.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|c| !c.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CultiveraItem {
    pub id: Option<Value>,
    pub barcode: Option<Value>,
    pub quantity: Option<Value>,
    pub product: Option<CultiveraProduct>,
    #[serde(default)]
    pub test_results: Vec<CultiveraTestResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CultiveraProduct {
    pub name: Option<String>,
    pub category: Option<String>,
    pub strain_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CultiveraTestResult {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub percentage: Option<Value>,
}

pub fn parse_cultivera(bytes: &[u8]) -> Result<CultiveraDocument, ParseError> {
    let document: CultiveraDocument =
        serde_json::from_slice(bytes).map_err(|error| ParseError::Json {
            kind: SourceKind::Cultivera,
            error,
        })?;
    tracing::debug!(
        has_manifest = document
            .data
            .as_ref()
            .is_some_and(|d| d.manifest.is_some()),
        "decoded cultivera document"
    );
    Ok(document)
}
