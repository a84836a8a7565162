use serde::Deserialize;
use serde_json::{Value, json};

use wms_core::{ItemId, LocationId};
use wms_inventory::{Item, StockLocation};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub id: Option<ItemId>,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateLocationRequest {
    #[serde(default)]
    pub id: Option<LocationId>,
    #[serde(alias = "sku")]
    pub item: ItemId,
    pub stock: u64,
}

#[derive(Debug, Deserialize)]
pub struct AdjustStockRequest {
    pub delta: i64,
}

// -------------------------
// Response mapping
// -------------------------

pub fn item_to_json(item: &Item) -> Value {
    json!({
        "id": item.id().get(),
        "name": item.name(),
    })
}

pub fn location_to_json(location: &StockLocation) -> Value {
    json!({
        "id": location.id().get(),
        "item": location.item_id().get(),
        "stock": location.stock(),
    })
}
