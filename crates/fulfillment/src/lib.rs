//! Order fulfillment: request validation, least-stock-first allocation, and
//! the caller-facing response shape.
//!
//! The pipeline is synchronous and stateless per call:
//! - `validation`: raw request → typed `OrderLine`s (codes 1–10)
//! - `allocation`: order lines + stock snapshot → pick plan (code 11)
//! - `response`: outcome → `{success, picks | error}`, fault capture (98/99)
//!
//! [`validate_and_allocate`] composes all three.

pub mod allocation;
pub mod engine;
pub mod error;
pub mod order;
pub mod raw;
pub mod response;
pub mod validation;

pub use allocation::{StockSnapshot, allocate};
pub use engine::validate_and_allocate;
pub use error::{AllocationError, ErrorCode, FulfillmentError, Phase, ValidationError};
pub use order::{Failure, FulfillmentOutcome, OrderLine, Pick};
pub use raw::{Method, RawRequest, RawValue};
pub use response::{ErrorBody, FulfillmentResponse};
