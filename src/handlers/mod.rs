//! HTTP handlers for the item endpoints.

pub mod item;
pub use item::*;
