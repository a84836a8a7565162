use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::Extension,
    http::{Method as HttpMethod, StatusCode},
    response::IntoResponse,
};

use wms_fulfillment::{
    FulfillmentError, FulfillmentOutcome, FulfillmentResponse, Method, Phase, RawRequest,
    validate_and_allocate,
};

use crate::app::services::AppServices;

/// Hand the request to the engine untouched and render its outcome.
pub async fn fulfil_order(
    Extension(services): Extension<Arc<AppServices>>,
    method: HttpMethod,
    body: Bytes,
) -> axum::response::Response {
    let request = RawRequest::new(Method::parse(method.as_str()), body.to_vec());
    let inventory = Arc::clone(&services.inventory);

    let outcome =
        tokio::task::spawn_blocking(move || validate_and_allocate(&request, inventory.as_ref()))
            .await
            .unwrap_or_else(|join_err| {
                tracing::error!(error = %join_err, "fulfillment task did not complete");
                let fault = FulfillmentError::fault(Phase::Allocation, join_err);
                FulfillmentOutcome::Failure(fault.into())
            });

    let response = FulfillmentResponse::from(outcome);
    let status =
        StatusCode::from_u16(response.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response)).into_response()
}
