//! Bamboo inventory transfer documents.
//!
//! A transfer carries the sending license at the top level and one entry per
//! transferred lot in `inventory_transfer_items`.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ParseError;
use crate::item::SourceKind;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BambooTransfer {
    pub from_license_number: Option<Value>,
    pub from_license_name: Option<String>,
    pub est_arrival_at: Option<String>,
    pub transferred_at: Option<String>,
    /// `None` when the key is absent or null; the whole batch is then unusable.
    pub inventory_transfer_items: Option<Vec<BambooLine>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BambooLine {
    pub product_name: Option<String>,
    pub inventory_type: Option<String>,
    pub strain_name: Option<String>,
    pub qty: Option<Value>,
    pub inventory_id: Option<Value>,
    pub external_id: Option<Value>,
    pub lab_result_data: Option<LabResultData>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LabResultData {
    #[serde(default)]
    pub potency: Vec<Potency>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Potency {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub value: Option<Value>,
}

pub fn parse_bamboo(bytes: &[u8]) -> Result<BambooTransfer, ParseError> {
    let transfer: BambooTransfer =
        serde_json::from_slice(bytes).map_err(|error| ParseError::Json {
            kind: SourceKind::Bamboo,
            error,
        })?;
    tracing::debug!(
        lines = transfer.inventory_transfer_items.as_ref().map(Vec::len),
        "decoded bamboo transfer"
    );
    Ok(transfer)
}
