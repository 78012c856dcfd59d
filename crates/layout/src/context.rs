//! Render context builder: reshape sized pages into the structure the slip
//! template consumes. No decisions are made here.

use serde::Serialize;
use serde_json::{Map, Value};

use slipgen_core::ItemId;
use slipgen_inventory::InventoryItem;

use crate::config::ItemsPerPage;
use crate::paginate::{Page, Slot};
use crate::sizing::SizedItem;

/// Printed in place of a blank vendor.
pub const UNKNOWN_VENDOR: &str = "Unknown Vendor";

fn vendor_label(item: &InventoryItem) -> &str {
    if item.vendor().is_empty() {
        UNKNOWN_VENDOR
    } else {
        item.vendor()
    }
}

/// Text printed in a filled slot. Sizing measures exactly these strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintedFields {
    pub product_name: String,
    pub barcode: String,
    pub accepted_date: String,
    pub quantity_received: String,
    pub vendor: String,
    pub product_type: String,
    pub strain_name: String,
    pub thc_content: String,
    pub cbd_content: String,
}

impl PrintedFields {
    pub fn of(item: &InventoryItem) -> Self {
        Self {
            product_name: item.product_name().to_string(),
            barcode: item.barcode().to_string(),
            accepted_date: item
                .accepted_date()
                .map(|d| d.to_string())
                .unwrap_or_default(),
            quantity_received: item.quantity_display(),
            vendor: vendor_label(item).to_string(),
            product_type: item.category().to_string(),
            strain_name: item.strain_name().to_string(),
            thc_content: item.thc_content().to_string(),
            cbd_content: item.cbd_content().to_string(),
        }
    }

    pub fn texts(&self) -> [&str; 9] {
        [
            &self.product_name,
            &self.barcode,
            &self.accepted_date,
            &self.quantity_received,
            &self.vendor,
            &self.product_type,
            &self.strain_name,
            &self.thc_content,
            &self.cbd_content,
        ]
    }

    /// Character count of the longest field.
    pub fn longest(&self) -> usize {
        self.texts()
            .iter()
            .map(|text| text.chars().count())
            .max()
            .unwrap_or(0)
    }
}

/// One template slot (`Label1`..`LabelN`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SlotContext {
    pub label: String,
    pub empty: bool,
    pub item_id: Option<ItemId>,
    pub product_name: String,
    pub barcode: String,
    pub accepted_date: String,
    pub quantity_received: String,
    pub vendor: String,
    pub product_type: String,
    pub strain_name: String,
    #[serde(rename = "THCContent")]
    pub thc_content: String,
    #[serde(rename = "CBDContent")]
    pub cbd_content: String,
    pub font_size: Option<u8>,
    pub overflow: bool,
}

impl SlotContext {
    fn filled(label: String, sized: &SizedItem<'_>) -> Self {
        let PrintedFields {
            product_name,
            barcode,
            accepted_date,
            quantity_received,
            vendor,
            product_type,
            strain_name,
            thc_content,
            cbd_content,
        } = PrintedFields::of(sized.item);
        Self {
            label,
            empty: false,
            item_id: Some(sized.item.id_typed().clone()),
            product_name,
            barcode,
            accepted_date,
            quantity_received,
            vendor,
            product_type,
            strain_name,
            thc_content,
            cbd_content,
            font_size: Some(sized.font_size.points()),
            overflow: sized.overflow,
        }
    }

    fn empty(label: String) -> Self {
        Self {
            label,
            empty: true,
            item_id: None,
            product_name: String::new(),
            barcode: String::new(),
            accepted_date: String::new(),
            quantity_received: String::new(),
            vendor: String::new(),
            product_type: String::new(),
            strain_name: String::new(),
            thc_content: String::new(),
            cbd_content: String::new(),
            font_size: None,
            overflow: false,
        }
    }
}

/// One page, i.e. one repeat of the template.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageContext {
    pub page_number: usize,
    pub slots: Vec<SlotContext>,
}

impl PageContext {
    /// Template variables keyed by slot label: `{"Label1": {...}, ...}`.
    pub fn template_vars(&self) -> serde_json::Result<Value> {
        let mut vars = Map::new();
        for slot in &self.slots {
            vars.insert(slot.label.clone(), serde_json::to_value(slot)?);
        }
        Ok(Value::Object(vars))
    }
}

/// Everything the document renderer needs, one entry per page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderContext {
    pub items_per_page: ItemsPerPage,
    pub pages: Vec<PageContext>,
}

impl RenderContext {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

pub fn build_context(pages: &[Page<SizedItem<'_>>], items_per_page: ItemsPerPage) -> RenderContext {
    let pages = pages
        .iter()
        .map(|page| PageContext {
            page_number: page.number,
            slots: page
                .slots
                .iter()
                .enumerate()
                .map(|(i, slot)| {
                    let label = format!("Label{}", i + 1);
                    match slot {
                        Slot::Filled(sized) => SlotContext::filled(label, sized),
                        Slot::Empty => SlotContext::empty(label),
                    }
                })
                .collect(),
        })
        .collect();

    RenderContext {
        items_per_page,
        pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FontSize;
    use slipgen_inventory::{ItemFields, SourceKind};

    fn item() -> InventoryItem {
        InventoryItem::new(
            ItemId::positional("bamboo", 0),
            SourceKind::Bamboo,
            ItemFields {
                product_name: "Blue Dream 3.5g".to_string(),
                barcode: "INV-1".to_string(),
                quantity: 12.0,
                category: "Flower".to_string(),
                thc_content: "21.5%".to_string(),
                ..ItemFields::default()
            },
        )
    }

    #[test]
    fn builds_labelled_slots_with_empty_markers() {
        let item = item();
        let page = Page {
            number: 1,
            slots: vec![
                Slot::Filled(SizedItem {
                    item: &item,
                    font_size: FontSize::new(10),
                    overflow: false,
                }),
                Slot::Empty,
            ],
        };

        let context = build_context(&[page], ItemsPerPage::Two);
        assert_eq!(context.page_count(), 1);

        let slots = &context.pages[0].slots;
        assert_eq!(slots[0].label, "Label1");
        assert_eq!(slots[0].product_name, "Blue Dream 3.5g");
        assert_eq!(slots[0].quantity_received, "12");
        assert_eq!(slots[0].vendor, UNKNOWN_VENDOR);
        assert_eq!(slots[0].product_type, "Flower");
        assert_eq!(slots[0].font_size, Some(10));
        assert!(!slots[0].empty);

        assert_eq!(slots[1].label, "Label2");
        assert!(slots[1].empty);
        assert_eq!(slots[1].font_size, None);
        assert_eq!(slots[1].product_name, "");
    }

    #[test]
    fn template_vars_use_template_field_names() {
        let item = item();
        let page = Page {
            number: 1,
            slots: vec![Slot::Filled(SizedItem {
                item: &item,
                font_size: FontSize::new(12),
                overflow: false,
            })],
        };
        let context = build_context(&[page], ItemsPerPage::Two);

        let vars = context.pages[0].template_vars().unwrap();
        assert_eq!(vars["Label1"]["ProductName"], "Blue Dream 3.5g");
        assert_eq!(vars["Label1"]["QuantityReceived"], "12");
        assert_eq!(vars["Label1"]["THCContent"], "21.5%");
        assert_eq!(vars["Label1"]["FontSize"], 12);
        assert_eq!(vars["Label1"]["ItemId"], "bamboo-0");
        assert_eq!(vars["Label1"]["Vendor"], UNKNOWN_VENDOR);
        assert_eq!(vars.as_object().map(|m| m.len()), Some(1));
    }

    #[test]
    fn no_pages_gives_an_empty_context() {
        let context = build_context(&[], ItemsPerPage::Four);
        assert!(context.is_empty());
    }
}
