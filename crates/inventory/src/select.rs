//! Item selection: search, category filter and explicit picks.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use slipgen_core::{Entity, ItemId};

use crate::item::InventoryItem;

/// What to print out of a loaded item set.
///
/// - `search_text`: case-insensitive substring over product name, strain,
///   vendor and barcode (any field may match). Blank matches everything.
/// - `category`: case-insensitive exact category. `None` or blank matches
///   everything.
/// - `explicit_ids`: when present, exactly these items are selected and the
///   filters above are not applied to them.
/// - `excluded_ids`: removed from filter matches; never removes an explicit pick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSpec {
    #[serde(default)]
    pub search_text: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub explicit_ids: Option<BTreeSet<ItemId>>,
    #[serde(default)]
    pub excluded_ids: BTreeSet<ItemId>,
}

impl SelectionSpec {
    /// Select everything, in load order.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn search(text: impl Into<String>) -> Self {
        Self {
            search_text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_explicit_ids(mut self, ids: impl IntoIterator<Item = ItemId>) -> Self {
        self.explicit_ids = Some(ids.into_iter().collect());
        self
    }

    pub fn excluding(mut self, ids: impl IntoIterator<Item = ItemId>) -> Self {
        self.excluded_ids.extend(ids);
        self
    }

    fn matches_filters(&self, item: &InventoryItem, query: &str, category: Option<&str>) -> bool {
        if self.excluded_ids.contains(item.id()) {
            return false;
        }
        if let Some(category) = category {
            if item.category().to_lowercase() != category {
                return false;
            }
        }
        query.is_empty()
            || item
                .searchable_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(query))
    }
}

/// Items chosen by `spec`, in the order they were loaded.
pub fn select<'a>(items: &'a [InventoryItem], spec: &SelectionSpec) -> Vec<&'a InventoryItem> {
    let selected: Vec<&InventoryItem> = match &spec.explicit_ids {
        Some(ids) => items
            .iter()
            .filter(|item| ids.contains(item.id()))
            .collect(),
        None => {
            let query = spec.search_text.trim().to_lowercase();
            let category = spec
                .category
                .as_deref()
                .map(|c| c.trim().to_lowercase())
                .filter(|c| !c.is_empty());
            items
                .iter()
                .filter(|item| spec.matches_filters(item, &query, category.as_deref()))
                .collect()
        }
    };

    tracing::debug!(
        loaded = items.len(),
        selected = selected.len(),
        explicit = spec.explicit_ids.is_some(),
        "items selected"
    );
    selected
}

/// Distinct categories, sorted case-insensitively. The first spelling seen wins.
pub fn categories(items: &[InventoryItem]) -> Vec<&str> {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    for item in items {
        seen.entry(item.category().to_lowercase())
            .or_insert(item.category());
    }
    seen.into_values().collect()
}

/// Ids of every item in `category` (case-insensitive), for "select group".
pub fn ids_in_category(items: &[InventoryItem], category: &str) -> BTreeSet<ItemId> {
    let wanted = category.trim().to_lowercase();
    items
        .iter()
        .filter(|item| item.category().to_lowercase() == wanted)
        .map(|item| item.id().clone())
        .collect()
}

/// Items of one category, for list and preview display.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: &'a str,
    pub items: Vec<&'a InventoryItem>,
}

/// Group items by category (sorted case-insensitively), each group ordered
/// by product name. Display only; selection order is never affected.
pub fn group_by_category(items: &[InventoryItem]) -> Vec<CategoryGroup<'_>> {
    let mut groups: BTreeMap<String, CategoryGroup<'_>> = BTreeMap::new();
    for item in items {
        groups
            .entry(item.category().to_lowercase())
            .or_insert_with(|| CategoryGroup {
                category: item.category(),
                items: Vec::new(),
            })
            .items
            .push(item);
    }

    groups
        .into_values()
        .map(|mut group| {
            group
                .items
                .sort_by_cached_key(|item| item.product_name().to_lowercase());
            group
        })
        .collect()
}
