//! Document planning: select -> paginate -> size -> render context.

use serde::Serialize;

use slipgen_core::{DomainResult, ItemId};
use slipgen_inventory::{InventoryItem, SelectionSpec, select};

use crate::config::LayoutConfig;
use crate::context::{RenderContext, build_context};
use crate::paginate::{Page, Slot, paginate};
use crate::sizing::{SizedItem, longest_field, size_page};

/// Advisory layout outcome. The plan is still produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "warning")]
pub enum LayoutWarning {
    /// Nothing was selected, so the document would have no pages.
    EmptySelection,
    /// The item does not fit its slot even at the smallest font size.
    Overflow {
        item_id: ItemId,
        page: usize,
        /// 1-based slot position on the page.
        slot: usize,
        longest_field: usize,
    },
}

impl core::fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LayoutWarning::EmptySelection => f.write_str("no items selected; nothing to print"),
            LayoutWarning::Overflow {
                item_id,
                page,
                slot,
                longest_field,
            } => write!(
                f,
                "{item_id} on page {page} slot {slot} overflows ({longest_field} characters at the smallest font size)"
            ),
        }
    }
}

/// Render context plus everything the caller should surface to the user.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentPlan {
    pub context: RenderContext,
    pub warnings: Vec<LayoutWarning>,
}

impl DocumentPlan {
    pub fn page_count(&self) -> usize {
        self.context.page_count()
    }

    pub fn is_empty(&self) -> bool {
        self.context.is_empty()
    }

    pub fn overflowed(&self) -> impl Iterator<Item = &ItemId> {
        self.warnings.iter().filter_map(|w| match w {
            LayoutWarning::Overflow { item_id, .. } => Some(item_id),
            LayoutWarning::EmptySelection => None,
        })
    }
}

/// Paginate and size an already selected, ordered set of items.
pub fn layout<'a>(
    selected: impl IntoIterator<Item = &'a InventoryItem>,
    config: &LayoutConfig,
) -> Vec<Page<SizedItem<'a>>> {
    let budget = config.char_budget();
    paginate(selected, config.items_per_page)
        .into_iter()
        .map(|page| {
            size_page(
                page,
                budget,
                &config.font_size_domain,
                config.reference_font_size,
            )
        })
        .collect()
}

fn overflow_warnings(pages: &[Page<SizedItem<'_>>]) -> Vec<LayoutWarning> {
    let mut warnings = Vec::new();
    for page in pages {
        for (i, slot) in page.slots.iter().enumerate() {
            if let Slot::Filled(sized) = slot
                && sized.overflow
            {
                warnings.push(LayoutWarning::Overflow {
                    item_id: sized.item.id_typed().clone(),
                    page: page.number,
                    slot: i + 1,
                    longest_field: longest_field(sized.item),
                });
            }
        }
    }
    warnings
}

/// Plan the printable document for `items`.
///
/// Fails only on an invalid configuration. An empty selection yields a plan
/// with zero pages and [`LayoutWarning::EmptySelection`].
pub fn plan_document(
    items: &[InventoryItem],
    selection: &SelectionSpec,
    config: &LayoutConfig,
) -> DomainResult<DocumentPlan> {
    config.validate()?;

    let selected = select(items, selection);
    let pages = layout(selected, config);

    let mut warnings = overflow_warnings(&pages);
    for warning in &warnings {
        tracing::warn!(%warning, "slot overflow");
    }
    if pages.is_empty() {
        tracing::warn!("empty selection; document has no pages");
        warnings.push(LayoutWarning::EmptySelection);
    }

    let context = build_context(&pages, config.items_per_page);
    tracing::info!(
        pages = context.page_count(),
        items_per_page = %config.items_per_page,
        warnings = warnings.len(),
        "document planned"
    );

    Ok(DocumentPlan { context, warnings })
}
