//! Slip layout: pagination, font sizing and the render context handed to the
//! document template.
//!
//! All functions here are pure. Configuration is passed in explicitly via
//! [`LayoutConfig`].

pub mod config;
pub mod context;
pub mod paginate;
pub mod plan;
pub mod sizing;

pub use config::{CharBudgets, FontSize, ItemsPerPage, LayoutConfig, SizeDomain};
pub use context::{
    PageContext, PrintedFields, RenderContext, SlotContext, UNKNOWN_VENDOR, build_context,
};
pub use paginate::{Page, Slot, page_count, paginate};
pub use plan::{DocumentPlan, LayoutWarning, layout, plan_document};
pub use sizing::{SizeChoice, SizedItem, choose_font_size, longest_field, size_item, size_page};
