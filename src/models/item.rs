use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use std::collections::BTreeMap;
use utoipa::ToSchema;

/// Inventory item. Missing JSON fields take their zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Item {
    pub id: String,
    pub name: String,
    /// Weak reference to a category owned by another service; never checked for existence.
    #[serde(rename = "categoryID")]
    pub category_id: String,
    pub active: bool,
    #[serde(rename = "soldByType")]
    pub sold_by_type: String,
    pub price: i64,
    pub cost: i64,
    pub sku: String,
    pub barcode: String,
    #[serde(rename = "trackStock")]
    pub track_stock: bool,
    pub color: String,
    pub image: String,
}

/// Create payload: an [`Item`] without the server-assigned id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ItemRequest {
    pub name: String,
    #[serde(rename = "categoryID")]
    pub category_id: String,
    pub active: bool,
    #[serde(rename = "soldByType")]
    pub sold_by_type: String,
    pub price: i64,
    pub cost: i64,
    pub sku: String,
    pub barcode: String,
    #[serde(rename = "trackStock")]
    pub track_stock: bool,
    pub color: String,
    pub image: String,
}

impl ItemRequest {
    pub fn into_item(self, id: String) -> Item {
        Item {
            id,
            name: self.name,
            category_id: self.category_id,
            active: self.active,
            sold_by_type: self.sold_by_type,
            price: self.price,
            cost: self.cost,
            sku: self.sku,
            barcode: self.barcode,
            track_stock: self.track_stock,
            color: self.color,
            image: self.image,
        }
    }
}

/// An item as read back from a store, with each configured association's child rows
/// serialized under the association name next to the item fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedItem {
    #[serde(flatten)]
    pub item: Item,
    #[serde(flatten)]
    pub associations: BTreeMap<String, Vec<Value>>,
}

impl From<Item> for LoadedItem {
    fn from(item: Item) -> Self {
        LoadedItem {
            item,
            associations: BTreeMap::new(),
        }
    }
}
