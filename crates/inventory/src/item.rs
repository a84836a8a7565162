use serde::{Deserialize, Serialize};

use wms_core::{ItemId, LocationId};

/// A stock-keeping unit. Identity never changes once registered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    id: ItemId,
    name: String,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A holding of some quantity of exactly one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLocation {
    id: LocationId,
    item_id: ItemId,
    stock: u64,
}

impl StockLocation {
    pub fn new(id: LocationId, item_id: ItemId, stock: u64) -> Self {
        Self { id, item_id, stock }
    }

    pub fn id(&self) -> LocationId {
        self.id
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn stock(&self) -> u64 {
        self.stock
    }

    pub(crate) fn set_stock(&mut self, stock: u64) {
        self.stock = stock;
    }

    pub fn level(&self) -> StockLevel {
        StockLevel {
            location_id: self.id,
            stock: self.stock,
        }
    }
}

/// Point-in-time available stock at one location.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockLevel {
    pub location_id: LocationId,
    pub stock: u64,
}

impl StockLevel {
    pub fn new(location_id: LocationId, stock: u64) -> Self {
        Self { location_id, stock }
    }

    /// Depletion order: least stock first, ties broken by ascending location id.
    pub fn depletion_key(&self) -> (u64, LocationId) {
        (self.stock, self.location_id)
    }
}
