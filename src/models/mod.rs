//! Wire and storage shapes for inventory items.

mod item;
pub use item::{Item, ItemRequest, LoadedItem};
