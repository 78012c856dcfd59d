//! `slipgen-core`: domain building blocks shared by the other crates.
//!
//! This crate contains **pure domain** primitives (no I/O, no rendering).

pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::ItemId;
pub use value_object::ValueObject;
