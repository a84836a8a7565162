//! Read-only inventory lookup seam.

use std::sync::Arc;

use thiserror::Error;

use wms_core::ItemId;

use crate::item::StockLevel;

/// Backend fault while reading inventory.
///
/// Absence is never an error: an unknown item is `Ok(false)` from
/// [`InventoryLookup::item_exists`] and `Ok(vec![])` from
/// [`InventoryLookup::stock_locations`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("inventory backend unavailable: {0}")]
    Unavailable(String),
}

/// Resolves item identifiers to existence and to ordered stock snapshots.
///
/// Implementations may block (e.g. on a database round trip). Callers must not
/// assume results are cached between calls.
pub trait InventoryLookup: Send + Sync {
    fn item_exists(&self, item_id: ItemId) -> Result<bool, LookupError>;

    /// Locations holding strictly positive stock for `item_id`, ordered by
    /// ascending stock and then ascending location id.
    fn stock_locations(&self, item_id: ItemId) -> Result<Vec<StockLevel>, LookupError>;
}

impl<S> InventoryLookup for Arc<S>
where
    S: InventoryLookup + ?Sized,
{
    fn item_exists(&self, item_id: ItemId) -> Result<bool, LookupError> {
        (**self).item_exists(item_id)
    }

    fn stock_locations(&self, item_id: ItemId) -> Result<Vec<StockLevel>, LookupError> {
        (**self).stock_locations(item_id)
    }
}

impl<S> InventoryLookup for &S
where
    S: InventoryLookup + ?Sized,
{
    fn item_exists(&self, item_id: ItemId) -> Result<bool, LookupError> {
        (**self).item_exists(item_id)
    }

    fn stock_locations(&self, item_id: ItemId) -> Result<Vec<StockLevel>, LookupError> {
        (**self).stock_locations(item_id)
    }
}
