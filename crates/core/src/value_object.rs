//! Value object trait: equality by value, not identity.
//!
//! Layout values (a font size, a sized slot, a page) have no identity of their
//! own. Two of them with the same attributes are interchangeable.

/// Marker trait for value objects.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: no identity (two font sizes of 10pt are the same value)
/// - **Entity**: has identity (two inventory items with equal text but
///   different ids are still different items)
///
/// Value objects are immutable; to "change" one, build a new one.
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct FontSize(u8);
///
/// impl ValueObject for FontSize {}
///
/// assert_eq!(FontSize(10), FontSize(10));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
