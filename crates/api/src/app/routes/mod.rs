use axum::{Router, routing::any};

pub mod fulfillment;
pub mod inventory;
pub mod system;

/// Router for every endpoint except `/health`.
pub fn router() -> Router {
    Router::new()
        // Any method: non-POST requests must reach the engine to get code 1.
        .route("/fulfillment", any(fulfillment::fulfil_order))
        .nest("/inventory", inventory::router())
}
