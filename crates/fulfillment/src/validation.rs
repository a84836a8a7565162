//! Request validation.
//!
//! Checks run in a fixed order and stop at the first failure. The order is
//! observable through the returned code and must not change; note that
//! emptiness of `lines` is checked before its type.
//!
//! 1. write method                  → 1
//! 2. body is a JSON object         → 2
//! 3. `lines` present               → 3
//! 4. `lines` non-empty             → 4
//! 5. `lines` is a list             → 5
//! 6. every line is an object       → 6
//! 7. every line has both fields    → 7
//! 8. both fields are integers      → 8
//! 9. both integers non-negative    → 9
//! 10. every sku exists             → 10
//!
//! Checks 6–9 each sweep the whole list before the next one starts. Only
//! check 10 touches the inventory.

use std::collections::BTreeMap;

use wms_core::ItemId;
use wms_inventory::InventoryLookup;

use crate::error::{FulfillmentError, Phase, ValidationError};
use crate::order::OrderLine;
use crate::raw::{RawRequest, RawValue};

pub const LINES_FIELD: &str = "lines";
pub const SKU_FIELD: &str = "sku";
pub const QUANTITY_FIELD: &str = "quantity";

const LINE_FIELDS: [&str; 2] = [SKU_FIELD, QUANTITY_FIELD];

type Record = BTreeMap<String, RawValue>;

/// Full validation: shape checks, then item existence.
///
/// Lookup faults are reported as validation-phase faults (code 98).
pub fn validate<L>(request: &RawRequest, lookup: &L) -> Result<Vec<OrderLine>, FulfillmentError>
where
    L: InventoryLookup + ?Sized,
{
    let lines = parse_lines(request)?;
    ensure_items_exist(&lines, lookup)?;
    Ok(lines)
}

/// Checks 1–9. Pure: no inventory access.
pub fn parse_lines(request: &RawRequest) -> Result<Vec<OrderLine>, ValidationError> {
    if !request.method.is_write() {
        return Err(ValidationError::WrongMethod(request.method.to_string()));
    }

    let payload = parse_payload(&request.body)?;
    let lines = payload.get(LINES_FIELD).ok_or(ValidationError::MissingLines)?;

    if lines.is_empty() {
        return Err(ValidationError::EmptyLines);
    }

    let elements = lines
        .as_sequence()
        .ok_or(ValidationError::LinesNotSequence { found: lines.kind() })?;

    let records = ensure_records(elements)?;
    ensure_fields_present(&records)?;
    let values = parse_integers(&records)?;
    ensure_non_negative(&values)
}

fn parse_payload(body: &[u8]) -> Result<Record, ValidationError> {
    let json: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| ValidationError::MalformedPayload(e.to_string()))?;

    match RawValue::from(json) {
        RawValue::Record(fields) => Ok(fields),
        other => Err(ValidationError::MalformedPayload(format!(
            "expected an object, {} found",
            other.kind()
        ))),
    }
}

fn ensure_records(elements: &[RawValue]) -> Result<Vec<&Record>, ValidationError> {
    elements
        .iter()
        .enumerate()
        .map(|(index, element)| {
            element.as_record().ok_or(ValidationError::LineNotRecord {
                index,
                found: element.kind(),
            })
        })
        .collect()
}

fn ensure_fields_present(records: &[&Record]) -> Result<(), ValidationError> {
    for (index, record) in records.iter().enumerate() {
        if let Some(field) = LINE_FIELDS.into_iter().find(|f| !record.contains_key(*f)) {
            return Err(ValidationError::MissingField { index, field });
        }
    }
    Ok(())
}

fn parse_integers(records: &[&Record]) -> Result<Vec<[i64; 2]>, ValidationError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let mut parsed = [0i64; 2];
            for (slot, field) in parsed.iter_mut().zip(LINE_FIELDS) {
                let value = record
                    .get(field)
                    .ok_or(ValidationError::MissingField { index, field })?;
                *slot = value.as_integer().ok_or(ValidationError::NotInteger {
                    index,
                    field,
                    found: value.kind(),
                })?;
            }
            Ok(parsed)
        })
        .collect()
}

fn ensure_non_negative(values: &[[i64; 2]]) -> Result<Vec<OrderLine>, ValidationError> {
    values
        .iter()
        .enumerate()
        .map(|(index, pair)| {
            for (value, field) in pair.iter().zip(LINE_FIELDS) {
                if *value < 0 {
                    return Err(ValidationError::Negative {
                        index,
                        field,
                        value: *value,
                    });
                }
            }
            let [sku, quantity] = *pair;
            // Non-negative i64 always fits in u64.
            Ok(OrderLine::new(ItemId::new(sku), quantity.unsigned_abs()))
        })
        .collect()
}

/// Check 10: every referenced item exists, reported for the first unknown sku
/// in line order.
pub fn ensure_items_exist<L>(lines: &[OrderLine], lookup: &L) -> Result<(), FulfillmentError>
where
    L: InventoryLookup + ?Sized,
{
    for line in lines {
        let exists = lookup
            .item_exists(line.item_id)
            .map_err(|e| FulfillmentError::fault(Phase::Validation, e))?;
        if !exists {
            return Err(ValidationError::UnknownItem(line.item_id).into());
        }
    }
    Ok(())
}
