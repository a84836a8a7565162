use serde::{Deserialize, Serialize};

use wms_core::{ItemId, LocationId};

use crate::error::{ErrorCode, FulfillmentError};

/// A validated request for `quantity` units of one item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct OrderLine {
    pub item_id: ItemId,
    pub quantity: u64,
}

impl OrderLine {
    pub fn new(item_id: ItemId, quantity: u64) -> Self {
        Self { item_id, quantity }
    }
}

/// Instruction to remove `quantity` units from one stock location.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pick {
    #[serde(rename = "id")]
    pub location_id: LocationId,
    pub quantity: u64,
}

impl Pick {
    pub fn new(location_id: LocationId, quantity: u64) -> Self {
        Self {
            location_id,
            quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub code: ErrorCode,
    pub message: String,
}

/// Result of one fulfillment call: the complete pick plan, or why there is none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FulfillmentOutcome {
    Success(Vec<Pick>),
    Failure(Failure),
}

impl FulfillmentOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn picks(&self) -> Option<&[Pick]> {
        match self {
            Self::Success(picks) => Some(picks),
            Self::Failure(_) => None,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Success(_) => None,
            Self::Failure(f) => Some(f.code),
        }
    }
}

impl From<FulfillmentError> for Failure {
    fn from(err: FulfillmentError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl From<Result<Vec<Pick>, FulfillmentError>> for FulfillmentOutcome {
    fn from(result: Result<Vec<Pick>, FulfillmentError>) -> Self {
        match result {
            Ok(picks) => Self::Success(picks),
            Err(err) => Self::Failure(err.into()),
        }
    }
}
