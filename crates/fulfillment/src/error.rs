//! Fulfillment error model and the stable numeric codes callers depend on.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use wms_core::ItemId;

/// Stable error codes. Never renumber: clients branch on these values.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    WrongMethod = 1,
    MalformedPayload = 2,
    MissingLines = 3,
    EmptyLines = 4,
    LinesNotSequence = 5,
    LineNotRecord = 6,
    MissingField = 7,
    NotInteger = 8,
    Negative = 9,
    UnknownItem = 10,
    CannotFulfill = 11,
    ValidationFault = 98,
    AllocationFault = 99,
}

impl ErrorCode {
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// True for the phase fault codes (98, 99).
    pub fn is_internal(self) -> bool {
        matches!(self, Self::ValidationFault | Self::AllocationFault)
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.as_u16()
    }
}

impl TryFrom<u16> for ErrorCode {
    type Error = String;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            1 => Self::WrongMethod,
            2 => Self::MalformedPayload,
            3 => Self::MissingLines,
            4 => Self::EmptyLines,
            5 => Self::LinesNotSequence,
            6 => Self::LineNotRecord,
            7 => Self::MissingField,
            8 => Self::NotInteger,
            9 => Self::Negative,
            10 => Self::UnknownItem,
            11 => Self::CannotFulfill,
            98 => Self::ValidationFault,
            99 => Self::AllocationFault,
            other => return Err(format!("unknown fulfillment error code {other}")),
        };
        Ok(code)
    }
}

impl core::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_u16())
    }
}

/// Request shape and reference failures (codes 1–10).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("fulfillment only accepts POST requests, received a {0} request")]
    WrongMethod(String),

    #[error("request body must be a valid JSON object: {0}")]
    MalformedPayload(String),

    #[error("request missing required parameter: lines")]
    MissingLines,

    #[error("parameter lines was empty, at least one order line is required")]
    EmptyLines,

    #[error("parameter lines must be a list, {found} found")]
    LinesNotSequence { found: &'static str },

    #[error("parameter lines must be a list of objects, {found} found at lines[{index}]")]
    LineNotRecord { index: usize, found: &'static str },

    #[error("required field missing for lines[{index}]: {field}")]
    MissingField { index: usize, field: &'static str },

    #[error("field {field} of lines[{index}] must be an integer, {found} found")]
    NotInteger {
        index: usize,
        field: &'static str,
        found: &'static str,
    },

    #[error("field {field} of lines[{index}] must be a non-negative integer, {value} found")]
    Negative {
        index: usize,
        field: &'static str,
        value: i64,
    },

    #[error("referenced sku {0} does not exist")]
    UnknownItem(ItemId),
}

impl ValidationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::WrongMethod(_) => ErrorCode::WrongMethod,
            Self::MalformedPayload(_) => ErrorCode::MalformedPayload,
            Self::MissingLines => ErrorCode::MissingLines,
            Self::EmptyLines => ErrorCode::EmptyLines,
            Self::LinesNotSequence { .. } => ErrorCode::LinesNotSequence,
            Self::LineNotRecord { .. } => ErrorCode::LineNotRecord,
            Self::MissingField { .. } => ErrorCode::MissingField,
            Self::NotInteger { .. } => ErrorCode::NotInteger,
            Self::Negative { .. } => ErrorCode::Negative,
            Self::UnknownItem(_) => ErrorCode::UnknownItem,
        }
    }
}

/// Business infeasibility (code 11).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllocationError {
    #[error("order cannot be fulfilled: sku {item_id} is short by {shortfall} of {requested}")]
    InsufficientStock {
        item_id: ItemId,
        requested: u64,
        shortfall: u64,
    },
}

impl AllocationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InsufficientStock { .. } => ErrorCode::CannotFulfill,
        }
    }
}

/// Pipeline stage in which an unanticipated fault surfaced.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Phase {
    Validation,
    Allocation,
}

impl core::fmt::Display for Phase {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Validation => f.write_str("validation"),
            Self::Allocation => f.write_str("allocation"),
        }
    }
}

/// Any way a fulfillment request can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FulfillmentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Allocation(#[from] AllocationError),

    #[error("internal server error during {phase}: {message}")]
    Fault { phase: Phase, message: String },
}

impl FulfillmentError {
    pub fn fault(phase: Phase, cause: impl core::fmt::Display) -> Self {
        Self::Fault {
            phase,
            message: cause.to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(e) => e.code(),
            Self::Allocation(e) => e.code(),
            Self::Fault {
                phase: Phase::Validation,
                ..
            } => ErrorCode::ValidationFault,
            Self::Fault {
                phase: Phase::Allocation,
                ..
            } => ErrorCode::AllocationFault,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(ErrorCode::WrongMethod.as_u16(), 1);
        assert_eq!(ErrorCode::EmptyLines.as_u16(), 4);
        assert_eq!(ErrorCode::UnknownItem.as_u16(), 10);
        assert_eq!(ErrorCode::CannotFulfill.as_u16(), 11);
        assert_eq!(ErrorCode::ValidationFault.as_u16(), 98);
        assert_eq!(ErrorCode::AllocationFault.as_u16(), 99);
    }

    #[test]
    fn faults_map_to_their_phase_code() {
        let v = FulfillmentError::fault(Phase::Validation, "boom");
        let a = FulfillmentError::fault(Phase::Allocation, "boom");
        assert_eq!(v.code(), ErrorCode::ValidationFault);
        assert_eq!(a.code(), ErrorCode::AllocationFault);
        assert!(v.code().is_internal());
        assert_eq!(v.to_string(), "internal server error during validation: boom");
    }

    #[test]
    fn codes_serialize_as_plain_numbers() {
        assert_eq!(serde_json::to_string(&ErrorCode::MissingField).unwrap(), "7");
        let code: ErrorCode = serde_json::from_str("99").unwrap();
        assert_eq!(code, ErrorCode::AllocationFault);
        assert!(serde_json::from_str::<ErrorCode>("12").is_err());
    }
}
