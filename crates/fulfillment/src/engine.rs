//! Entry point composing validation, allocation, and fault capture.

use tracing::instrument;

use wms_inventory::InventoryLookup;

use crate::allocation::{StockSnapshot, allocate};
use crate::error::{FulfillmentError, Phase};
use crate::order::{FulfillmentOutcome, OrderLine, Pick};
use crate::raw::RawRequest;
use crate::response::guard_phase;
use crate::validation::validate;

/// Validate `request` and compute its pick plan against `lookup`.
///
/// Never panics and never returns a raw error: every path ends in a
/// [`FulfillmentOutcome`] carrying a stable code.
#[instrument(skip_all, fields(method = %request.method, body_len = request.body.len()))]
pub fn validate_and_allocate<L>(request: &RawRequest, lookup: &L) -> FulfillmentOutcome
where
    L: InventoryLookup + ?Sized,
{
    tracing::debug!("validating fulfillment request");
    let result = guard_phase(Phase::Validation, || validate(request, lookup)).and_then(|lines| {
        tracing::debug!(lines = lines.len(), "allocating");
        guard_phase(Phase::Allocation, || plan(&lines, lookup))
    });

    match &result {
        Ok(picks) => tracing::info!(picks = picks.len(), "fulfillment planned"),
        Err(err) if err.code().is_internal() => {
            tracing::error!(code = %err.code(), error = %err, "fulfillment faulted")
        }
        Err(err) => tracing::warn!(code = %err.code(), error = %err, "fulfillment rejected"),
    }

    FulfillmentOutcome::from(result)
}

fn plan<L>(lines: &[OrderLine], lookup: &L) -> Result<Vec<Pick>, FulfillmentError>
where
    L: InventoryLookup + ?Sized,
{
    let snapshot = StockSnapshot::capture(lookup, lines)
        .map_err(|e| FulfillmentError::fault(Phase::Allocation, e))?;
    Ok(allocate(lines, &snapshot)?)
}
