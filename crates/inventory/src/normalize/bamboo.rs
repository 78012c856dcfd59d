//! Bamboo transfers: vendor and dates come from the transfer, everything
//! else from the nested transfer line.

use slipgen_core::ItemId;

use super::NormalizedRecord;
use super::fields::{accepted_date, percent, quantity_from_json, required_product_name};
use crate::error::NormalizationError;
use crate::item::{InventoryItem, ItemFields, SourceKind};
use crate::source::{BambooLine, BambooTransfer, Potency, RawRecord, json_text};

pub(super) fn records(transfer: &BambooTransfer) -> Result<Vec<RawRecord<'_>>, NormalizationError> {
    let lines = transfer.inventory_transfer_items.as_ref().ok_or_else(|| {
        NormalizationError::batch(SourceKind::Bamboo, "inventory_transfer_items", "is missing")
    })?;
    Ok(lines
        .iter()
        .map(|line| RawRecord::Bamboo { transfer, line })
        .collect())
}

/// First potency entry whose type is one of `kinds`, in preference order.
fn potency(entries: &[Potency], kinds: &[&str]) -> String {
    kinds
        .iter()
        .find_map(|wanted| {
            entries.iter().find(|p| {
                p.kind
                    .as_deref()
                    .is_some_and(|k| k.trim().eq_ignore_ascii_case(wanted))
            })
        })
        .map(|p| percent(&json_text(p.value.as_ref())))
        .unwrap_or_default()
}

pub(super) fn map_line(
    index: usize,
    transfer: &BambooTransfer,
    line: &BambooLine,
) -> Result<NormalizedRecord, NormalizationError> {
    let product_name = required_product_name(
        SourceKind::Bamboo,
        index,
        "product_name",
        line.product_name.as_deref(),
    )?;

    let quantity = quantity_from_json(line.qty.as_ref());

    let barcode = Some(json_text(line.inventory_id.as_ref()))
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| json_text(line.external_id.as_ref()));

    let date = [
        transfer.est_arrival_at.as_deref(),
        transfer.transferred_at.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find(|d| !d.trim().is_empty())
    .unwrap_or_default();

    let potency_entries = line
        .lab_result_data
        .as_ref()
        .map(|lab| lab.potency.as_slice())
        .unwrap_or_default();

    let fields = ItemFields {
        product_name,
        strain_name: line.strain_name.clone().unwrap_or_default(),
        vendor: transfer.from_license_name.clone().unwrap_or_default(),
        vendor_license: json_text(transfer.from_license_number.as_ref()),
        barcode,
        quantity: quantity.value,
        category: line.inventory_type.clone().unwrap_or_default(),
        accepted_date: accepted_date(date),
        thc_content: potency(potency_entries, &["total-thc", "thc"]),
        cbd_content: potency(potency_entries, &["total-cbd", "cbd"]),
    };

    Ok(NormalizedRecord {
        item: InventoryItem::new(
            ItemId::positional(SourceKind::Bamboo.as_str(), index),
            SourceKind::Bamboo,
            fields,
        ),
        quantity_coerced_from: quantity.coerced_from,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn transfer(lines: serde_json::Value) -> BambooTransfer {
        serde_json::from_value(json!({
            "from_license_number": 412345,
            "from_license_name": "Green Farms",
            "est_arrival_at": "",
            "transferred_at": "2024-03-02T10:00:00Z",
            "inventory_transfer_items": lines,
        }))
        .unwrap()
    }

    #[test]
    fn maps_nested_line_and_transfer_context() {
        let transfer = transfer(json!([{
            "product_name": "Blue Dream 1g Pre-Roll",
            "inventory_type": "Pre-Roll",
            "strain_name": "Blue Dream",
            "qty": "12",
            "inventory_id": null,
            "external_id": "EXT-77",
            "lab_result_data": {"potency": [
                {"type": "thc", "value": 19.0},
                {"type": "total-thc", "value": 21.5},
                {"type": "total-cbd", "value": "0.4"}
            ]}
        }]));
        let line = &transfer.inventory_transfer_items.as_ref().unwrap()[0];

        let item = map_line(0, &transfer, line).unwrap().item;
        assert_eq!(item.id_typed().as_str(), "bamboo-0");
        assert_eq!(item.product_name(), "Blue Dream 1g Pre-Roll");
        assert_eq!(item.category(), "Pre-Roll");
        assert_eq!(item.quantity(), 12.0);
        assert_eq!(item.barcode(), "EXT-77");
        assert_eq!(item.vendor(), "Green Farms");
        assert_eq!(item.vendor_license(), "412345");
        assert_eq!(item.accepted_date(), NaiveDate::from_ymd_opt(2024, 3, 2));
        assert_eq!(item.thc_content(), "21.5%");
        assert_eq!(item.cbd_content(), "0.4%");
    }

    #[test]
    fn missing_line_items_fail_the_whole_batch() {
        let transfer = BambooTransfer::default();
        let err = records(&transfer).unwrap_err();
        assert!(err.is_batch_level());
        assert_eq!(err.field, "inventory_transfer_items");
    }

    #[test]
    fn line_without_product_name_is_rejected() {
        let transfer = transfer(json!([{"qty": 1}]));
        let line = &transfer.inventory_transfer_items.as_ref().unwrap()[0];
        let err = map_line(5, &transfer, line).unwrap_err();
        assert_eq!(err.record_index(), Some(5));
        assert_eq!(err.field, "product_name");
    }
}
