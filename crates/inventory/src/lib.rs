//! Inventory domain module.
//!
//! Items, the stock locations that hold them, and the read-only lookup seam the
//! fulfillment engine consumes. `InMemoryInventory` is the bundled backend for
//! tests and development; durable storage lives outside this workspace.

pub mod in_memory;
pub mod item;
pub mod lookup;
pub mod seed;

pub use in_memory::InMemoryInventory;
pub use item::{Item, StockLevel, StockLocation};
pub use lookup::{InventoryLookup, LookupError};
pub use seed::{InventorySeed, ItemSeed, LocationSeed};
