//! Pagination engine: fixed-size pages filled in selection order.

use serde::Serialize;

use crate::config::ItemsPerPage;

/// One position on a page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "slot", content = "value")]
pub enum Slot<T> {
    Filled(T),
    /// Padding on the last page; carries no item and no font size.
    Empty,
}

impl<T> Slot<T> {
    pub fn as_filled(&self) -> Option<&T> {
        match self {
            Slot::Filled(value) => Some(value),
            Slot::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Slot<U> {
        match self {
            Slot::Filled(value) => Slot::Filled(f(value)),
            Slot::Empty => Slot::Empty,
        }
    }
}

/// A page of exactly `items_per_page` slots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// 1-based page number.
    pub number: usize,
    pub slots: Vec<Slot<T>>,
}

impl<T> Page<T> {
    pub fn filled(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(Slot::as_filled)
    }

    pub fn filled_count(&self) -> usize {
        self.filled().count()
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            number: self.number,
            slots: self.slots.into_iter().map(|slot| slot.map(&mut f)).collect(),
        }
    }
}

/// Number of pages needed for `items` entries.
pub fn page_count(items: usize, per_page: ItemsPerPage) -> usize {
    items.div_ceil(per_page.get())
}

/// Partition `items` into pages: page `k` holds items `[k*n, (k+1)*n)`.
///
/// Only the last page may contain [`Slot::Empty`] padding. No items means no
/// pages.
pub fn paginate<T>(items: impl IntoIterator<Item = T>, per_page: ItemsPerPage) -> Vec<Page<T>> {
    let n = per_page.get();
    let mut pages: Vec<Page<T>> = Vec::new();
    let mut slots: Vec<Slot<T>> = Vec::with_capacity(n);

    for item in items {
        slots.push(Slot::Filled(item));
        if slots.len() == n {
            pages.push(Page {
                number: pages.len() + 1,
                slots: std::mem::replace(&mut slots, Vec::with_capacity(n)),
            });
        }
    }

    if !slots.is_empty() {
        slots.resize_with(n, || Slot::Empty);
        pages.push(Page {
            number: pages.len() + 1,
            slots,
        });
    }

    tracing::debug!(pages = pages.len(), per_page = n, "paginated selection");
    pages
}
