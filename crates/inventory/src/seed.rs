//! JSON seed document for populating an in-memory inventory at startup.

use serde::{Deserialize, Serialize};

use wms_core::{ItemId, LocationId};

/// Items and locations to load, in order. Items are registered before any
/// location, so a location may reference any item in the same document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySeed {
    #[serde(default)]
    pub items: Vec<ItemSeed>,
    #[serde(default)]
    pub locations: Vec<LocationSeed>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSeed {
    #[serde(default)]
    pub id: Option<ItemId>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationSeed {
    #[serde(default)]
    pub id: Option<LocationId>,
    #[serde(alias = "sku")]
    pub item: ItemId,
    pub stock: u64,
}
