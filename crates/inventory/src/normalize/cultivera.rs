//! Cultivera manifests: manifest -> packages -> items, category on the package.

use slipgen_core::ItemId;

use super::NormalizedRecord;
use super::fields::{accepted_date, percent, quantity_from_json, required_product_name};
use crate::error::NormalizationError;
use crate::item::{InventoryItem, ItemFields, SourceKind};
use crate::source::{
    CultiveraDocument, CultiveraItem, CultiveraManifest, CultiveraTestResult, RawRecord, json_text,
};

pub(super) fn records(
    document: &CultiveraDocument,
) -> Result<Vec<RawRecord<'_>>, NormalizationError> {
    let data = document
        .data
        .as_ref()
        .ok_or_else(|| NormalizationError::batch(SourceKind::Cultivera, "data", "is missing"))?;
    let manifest = data.manifest.as_ref().ok_or_else(|| {
        NormalizationError::batch(SourceKind::Cultivera, "data.manifest", "is missing")
    })?;

    if manifest.packages.is_none() && manifest.items.is_none() {
        return Err(NormalizationError::batch(
            SourceKind::Cultivera,
            "data.manifest.packages",
            "is missing",
        ));
    }

    let packaged = manifest.packages.iter().flatten().flat_map(|package| {
        let package_category = package.category();
        package.items.iter().map(move |item| RawRecord::Cultivera {
            manifest,
            package_category,
            item,
        })
    });
    let loose = manifest.items.iter().flatten().map(|item| RawRecord::Cultivera {
        manifest,
        package_category: None,
        item,
    });

    Ok(packaged.chain(loose).collect())
}

fn test_result(results: &[CultiveraTestResult], needle: &str) -> String {
    results
        .iter()
        .find(|r| {
            r.kind
                .as_deref()
                .is_some_and(|k| k.to_ascii_lowercase().contains(needle))
        })
        .map(|r| percent(&json_text(r.percentage.as_ref())))
        .unwrap_or_default()
}

pub(super) fn map_item(
    index: usize,
    manifest: &CultiveraManifest,
    package_category: Option<&str>,
    item: &CultiveraItem,
) -> Result<NormalizedRecord, NormalizationError> {
    let product = item.product.as_ref();
    let product_name = required_product_name(
        SourceKind::Cultivera,
        index,
        "product.name",
        product.and_then(|p| p.name.as_deref()),
    )?;

    let quantity = quantity_from_json(item.quantity.as_ref());

    let barcode = Some(json_text(item.barcode.as_ref()))
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| json_text(item.id.as_ref()));

    // Package category first, then the product's own, then the item default.
    let category = package_category
        .or_else(|| product.and_then(|p| p.category.as_deref()))
        .unwrap_or_default()
        .to_string();

    let license = manifest.from_license.as_ref();

    let fields = ItemFields {
        product_name,
        strain_name: product
            .and_then(|p| p.strain_name.clone())
            .unwrap_or_default(),
        vendor: license.and_then(|l| l.name.clone()).unwrap_or_default(),
        vendor_license: json_text(license.and_then(|l| l.license_number.as_ref())),
        barcode,
        quantity: quantity.value,
        category,
        accepted_date: accepted_date(manifest.created_at.as_deref().unwrap_or_default()),
        thc_content: test_result(&item.test_results, "thc"),
        cbd_content: test_result(&item.test_results, "cbd"),
    };

    Ok(NormalizedRecord {
        item: InventoryItem::new(
            ItemId::positional(SourceKind::Cultivera.as_str(), index),
            SourceKind::Cultivera,
            fields,
        ),
        quantity_coerced_from: quantity.coerced_from,
    })
}
