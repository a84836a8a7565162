use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use wms_core::{ItemId, LocationId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/items", post(create_item))
        .route("/items/:id", get(get_item))
        .route("/items/:id/locations", get(get_item_locations))
        .route("/locations", post(create_location))
        .route("/locations/:id/adjust", post(adjust_stock))
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateItemRequest>,
) -> axum::response::Response {
    match services.inventory.register_item(body.id, body.name) {
        Ok(item) => {
            tracing::info!(item_id = %item.id(), "item created");
            (StatusCode::CREATED, Json(dto::item_to_json(&item))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let item_id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.inventory.item(item_id) {
        Ok(Some(item)) => (StatusCode::OK, Json(dto::item_to_json(&item))).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found"),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn get_item_locations(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let item_id: ItemId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.inventory.item(item_id) {
        Ok(Some(_)) => {}
        Ok(None) => {
            return errors::json_error(StatusCode::NOT_FOUND, "not_found", "item not found");
        }
        Err(e) => return errors::domain_error_to_response(e),
    }

    match services.inventory.locations_of(item_id) {
        Ok(locations) => {
            let list: Vec<serde_json::Value> =
                locations.iter().map(dto::location_to_json).collect();
            (StatusCode::OK, Json(serde_json::json!({ "locations": list }))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn create_location(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateLocationRequest>,
) -> axum::response::Response {
    match services.inventory.add_location(body.id, body.item, body.stock) {
        Ok(location) => {
            tracing::info!(location_id = %location.id(), "location created");
            (StatusCode::CREATED, Json(dto::location_to_json(&location))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn adjust_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::AdjustStockRequest>,
) -> axum::response::Response {
    let location_id: LocationId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match services.inventory.adjust_stock(location_id, body.delta) {
        Ok(location) => {
            tracing::info!(
                location_id = %location_id,
                delta = body.delta,
                stock = location.stock(),
                "stock adjusted"
            );
            (StatusCode::OK, Json(dto::location_to_json(&location))).into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}
