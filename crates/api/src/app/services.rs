use std::sync::Arc;

use wms_core::DomainResult;
use wms_inventory::{InMemoryInventory, InventorySeed};

/// Shared state handed to every handler.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub inventory: Arc<InMemoryInventory>,
}

impl AppServices {
    pub fn new(inventory: InMemoryInventory) -> Self {
        Self {
            inventory: Arc::new(inventory),
        }
    }
}

/// Wire the backends, loading `seed` into the inventory when present.
pub fn build_services(seed: Option<InventorySeed>) -> DomainResult<AppServices> {
    let inventory = match seed {
        Some(seed) => InMemoryInventory::from_seed(seed)?,
        None => InMemoryInventory::new(),
    };
    Ok(AppServices::new(inventory))
}
