use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use wms_core::{DomainError, DomainResult, ItemId, LocationId};

use crate::item::{Item, StockLevel, StockLocation};
use crate::lookup::{InventoryLookup, LookupError};
use crate::seed::InventorySeed;

#[derive(Debug, Default)]
struct State {
    items: BTreeMap<ItemId, Item>,
    locations: BTreeMap<LocationId, StockLocation>,
}

impl State {
    fn next_item_id(&self) -> DomainResult<ItemId> {
        match self.items.keys().next_back() {
            None => Ok(ItemId::new(1)),
            Some(last) => last
                .get()
                .checked_add(1)
                .map(ItemId::new)
                .ok_or_else(|| DomainError::conflict("no free item id after the highest one")),
        }
    }

    fn next_location_id(&self) -> DomainResult<LocationId> {
        match self.locations.keys().next_back() {
            None => Ok(LocationId::new(1)),
            Some(last) => last
                .get()
                .checked_add(1)
                .map(LocationId::new)
                .ok_or_else(|| DomainError::conflict("no free location id after the highest one")),
        }
    }
}

/// In-memory inventory for tests/dev.
///
/// Not durable: everything is lost when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    inner: RwLock<State>,
}

impl InMemoryInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from a seed document, failing on the first invalid entry.
    pub fn from_seed(seed: InventorySeed) -> DomainResult<Self> {
        let inventory = Self::new();
        for item in seed.items {
            inventory.register_item(item.id, item.name)?;
        }
        for location in seed.locations {
            inventory.add_location(location.id, location.item, location.stock)?;
        }
        let items = inventory.item_count()?;
        tracing::info!(items, "inventory seeded");
        Ok(inventory)
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, State>> {
        self.inner
            .read()
            .map_err(|_| DomainError::invariant("inventory lock poisoned"))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, State>> {
        self.inner
            .write()
            .map_err(|_| DomainError::invariant("inventory lock poisoned"))
    }

    /// Register an item. Without an explicit id the next free id is assigned.
    pub fn register_item(&self, id: Option<ItemId>, name: impl Into<String>) -> DomainResult<Item> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }

        let mut state = self.write()?;
        let id = match id {
            Some(id) => id,
            None => state.next_item_id()?,
        };
        if state.items.contains_key(&id) {
            return Err(DomainError::conflict(format!("item {id} already exists")));
        }

        let item = Item::new(id, name);
        state.items.insert(id, item.clone());
        tracing::debug!(item_id = %id, "item registered");
        Ok(item)
    }

    /// Add a stock location for an existing item.
    pub fn add_location(
        &self,
        id: Option<LocationId>,
        item_id: ItemId,
        stock: u64,
    ) -> DomainResult<StockLocation> {
        let mut state = self.write()?;
        if !state.items.contains_key(&item_id) {
            return Err(DomainError::not_found());
        }
        let id = match id {
            Some(id) => id,
            None => state.next_location_id()?,
        };
        if state.locations.contains_key(&id) {
            return Err(DomainError::conflict(format!("location {id} already exists")));
        }

        let location = StockLocation::new(id, item_id, stock);
        state.locations.insert(id, location.clone());
        tracing::debug!(location_id = %id, item_id = %item_id, stock, "location added");
        Ok(location)
    }

    /// Apply a signed stock delta to a location.
    pub fn adjust_stock(&self, location_id: LocationId, delta: i64) -> DomainResult<StockLocation> {
        if delta == 0 {
            return Err(DomainError::validation("delta cannot be zero"));
        }

        let mut state = self.write()?;
        let location = state
            .locations
            .get_mut(&location_id)
            .ok_or_else(DomainError::not_found)?;

        let new_stock = location
            .stock()
            .checked_add_signed(delta)
            .ok_or_else(|| DomainError::invariant("stock cannot go negative"))?;
        location.set_stock(new_stock);
        Ok(location.clone())
    }

    /// Overwrite a location's stock.
    pub fn set_stock(&self, location_id: LocationId, stock: u64) -> DomainResult<StockLocation> {
        let mut state = self.write()?;
        let location = state
            .locations
            .get_mut(&location_id)
            .ok_or_else(DomainError::not_found)?;
        location.set_stock(stock);
        Ok(location.clone())
    }

    pub fn item(&self, item_id: ItemId) -> DomainResult<Option<Item>> {
        Ok(self.read()?.items.get(&item_id).cloned())
    }

    /// Every location of an item, empty ones included, ordered by id.
    pub fn locations_of(&self, item_id: ItemId) -> DomainResult<Vec<StockLocation>> {
        Ok(self
            .read()?
            .locations
            .values()
            .filter(|l| l.item_id() == item_id)
            .cloned()
            .collect())
    }

    pub fn item_count(&self) -> DomainResult<usize> {
        Ok(self.read()?.items.len())
    }
}

impl InventoryLookup for InMemoryInventory {
    fn item_exists(&self, item_id: ItemId) -> Result<bool, LookupError> {
        let state = self
            .inner
            .read()
            .map_err(|_| LookupError::Unavailable("inventory lock poisoned".into()))?;
        Ok(state.items.contains_key(&item_id))
    }

    fn stock_locations(&self, item_id: ItemId) -> Result<Vec<StockLevel>, LookupError> {
        let state = self
            .inner
            .read()
            .map_err(|_| LookupError::Unavailable("inventory lock poisoned".into()))?;

        let mut levels: Vec<StockLevel> = state
            .locations
            .values()
            .filter(|l| l.item_id() == item_id && l.stock() > 0)
            .map(StockLocation::level)
            .collect();
        levels.sort_by_key(StockLevel::depletion_key);
        Ok(levels)
    }
}
