use axum::{extract::State, Extension, Json};
use lunch_core::RestaurantMenus;
use serde::Serialize;

use super::{map_service_error, ApiError, AppState};
use crate::middleware::RequestId;
use crate::service::CacheStatus;

#[derive(Debug, Serialize)]
pub(super) struct RefreshResponse {
    message: &'static str,
    data: RestaurantMenus,
}

pub(super) async fn list_menus(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<RestaurantMenus>, ApiError> {
    state
        .menus
        .get_menus()
        .await
        .map(Json)
        .map_err(|e| map_service_error(req_id.0, &e))
}

pub(super) async fn refresh_menus(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let data = state
        .menus
        .refresh_menus()
        .await
        .map_err(|e| map_service_error(req_id.0, &e))?;

    Ok(Json(RefreshResponse {
        message: "Menus refreshed successfully",
        data,
    }))
}

pub(super) async fn cache_status(State(state): State<AppState>) -> Json<CacheStatus> {
    Json(state.menus.cache_status().await)
}
