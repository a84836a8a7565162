//! Caller-facing response shape and per-phase fault capture.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};

use crate::error::{ErrorCode, FulfillmentError, Phase};
use crate::order::{FulfillmentOutcome, Pick};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

/// `{"success": true, "picks": [...]}` or `{"success": false, "error": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picks: Option<Vec<Pick>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl FulfillmentResponse {
    /// HTTP status for this response: 200, 400 for request/stock failures,
    /// 500 for internal faults.
    pub fn status_code(&self) -> u16 {
        match &self.error {
            None => 200,
            Some(e) if e.code.is_internal() => 500,
            Some(_) => 400,
        }
    }
}

impl From<FulfillmentOutcome> for FulfillmentResponse {
    fn from(outcome: FulfillmentOutcome) -> Self {
        match outcome {
            FulfillmentOutcome::Success(picks) => Self {
                success: true,
                picks: Some(picks),
                error: None,
            },
            FulfillmentOutcome::Failure(failure) => Self {
                success: false,
                picks: None,
                error: Some(ErrorBody {
                    code: failure.code,
                    message: failure.message,
                }),
            },
        }
    }
}

/// Run one pipeline phase, turning a panic inside it into a fault for `phase`.
pub fn guard_phase<T, F>(phase: Phase, run: F) -> Result<T, FulfillmentError>
where
    F: FnOnce() -> Result<T, FulfillmentError>,
{
    match panic::catch_unwind(AssertUnwindSafe(run)) {
        Ok(result) => result,
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(%phase, %message, "fulfillment phase panicked");
            Err(FulfillmentError::Fault { phase, message })
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::Failure;
    use serde_json::json;
    use wms_core::LocationId;

    #[test]
    fn success_serializes_picks_only() {
        let response = FulfillmentResponse::from(FulfillmentOutcome::Success(vec![Pick::new(
            LocationId::new(1),
            5,
        )]));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"success": true, "picks": [{"id": 1, "quantity": 5}]})
        );
        assert_eq!(response.status_code(), 200);
    }

    #[test]
    fn failure_serializes_code_and_message() {
        let response = FulfillmentResponse::from(FulfillmentOutcome::Failure(Failure {
            code: ErrorCode::CannotFulfill,
            message: "order cannot be fulfilled".into(),
        }));
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"success": false, "error": {"code": 11, "message": "order cannot be fulfilled"}})
        );
        assert_eq!(response.status_code(), 400);
    }

    #[test]
    fn internal_faults_map_to_server_error_status() {
        let err = FulfillmentError::fault(Phase::Allocation, "store offline");
        let response = FulfillmentResponse::from(FulfillmentOutcome::Failure(err.into()));
        assert_eq!(response.status_code(), 500);
        assert_eq!(response.error.unwrap().code, ErrorCode::AllocationFault);
    }

    #[test]
    fn guard_phase_passes_results_through() {
        let ok: Result<u8, _> = guard_phase(Phase::Validation, || Ok(7));
        assert_eq!(ok, Ok(7));
    }

    #[test]
    fn guard_phase_turns_panics_into_phase_faults() {
        let result: Result<(), _> = guard_phase(Phase::Validation, || panic!("lookup exploded"));
        let err = result.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFault);
        assert!(err.to_string().contains("lookup exploded"));

        let result: Result<(), _> =
            guard_phase(Phase::Allocation, || panic!("{} exploded", "snapshot"));
        assert_eq!(result.unwrap_err().code(), ErrorCode::AllocationFault);
    }
}
