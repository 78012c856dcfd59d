//! Sizing engine: the largest font size at which an item fits its slot.
//!
//! A field of `len` characters at size `s` needs `len * s / reference` budget
//! characters. Sizes are tried largest first and the first size at which the
//! longest displayed field fits wins. When nothing fits, the smallest size is
//! used and the item is flagged as overflowing; it is never dropped.

use serde::Serialize;

use slipgen_core::ValueObject;
use slipgen_inventory::InventoryItem;

use crate::config::{FontSize, SizeDomain};
use crate::context::PrintedFields;
use crate::paginate::Page;

/// Chosen size for one item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct SizeChoice {
    pub font_size: FontSize,
    pub overflow: bool,
}

impl ValueObject for SizeChoice {}

/// An item placed in a slot together with its size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizedItem<'a> {
    pub item: &'a InventoryItem,
    pub font_size: FontSize,
    pub overflow: bool,
}

/// Longest text printed in a slot, in characters. Measures the same fields
/// the render context prints, vendor placeholder included.
pub fn longest_field(item: &InventoryItem) -> usize {
    PrintedFields::of(item).longest()
}

fn fits(length: usize, size: FontSize, budget: u32, reference: FontSize) -> bool {
    let needed = length as u128 * u128::from(size.points());
    let available = u128::from(budget) * u128::from(reference.points());
    needed <= available
}

/// Pick a size for text whose longest field is `length` characters.
pub fn choose_font_size(
    length: usize,
    budget: u32,
    domain: &SizeDomain,
    reference: FontSize,
) -> SizeChoice {
    domain
        .sizes()
        .iter()
        .find(|&&size| fits(length, size, budget, reference))
        .map(|&font_size| SizeChoice {
            font_size,
            overflow: false,
        })
        .unwrap_or(SizeChoice {
            font_size: domain.smallest(),
            overflow: true,
        })
}

pub fn size_item(
    item: &InventoryItem,
    budget: u32,
    domain: &SizeDomain,
    reference: FontSize,
) -> SizeChoice {
    choose_font_size(longest_field(item), budget, domain, reference)
}

/// Size every filled slot of `page`; empty slots stay empty.
pub fn size_page<'a>(
    page: Page<&'a InventoryItem>,
    budget: u32,
    domain: &SizeDomain,
    reference: FontSize,
) -> Page<SizedItem<'a>> {
    page.map(|item| {
        let SizeChoice {
            font_size,
            overflow,
        } = size_item(item, budget, domain, reference);
        SizedItem {
            item,
            font_size,
            overflow,
        }
    })
}
