use axum::{Router, extract::State, response::Json, routing::get};
use menu_service::serializer::{serialize_menu_item, serialize_restaurant};
use tracing::instrument;

use crate::error::AppError;
use crate::extract::Path;
use crate::models::*;

use super::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants/JSON/", get(list_restaurants))
        .route("/restaurant/{restaurant_id}/menu/JSON/", get(list_menu_items))
        .route(
            "/restaurant/{restaurant_id}/menu/{menu_id}/JSON/",
            get(get_menu_item),
        )
}

#[utoipa::path(
    get,
    path = "/restaurants/JSON/",
    responses(
        (status = 200, description = "All restaurants", body = RestaurantsResponse),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<RestaurantsResponse>, AppError> {
    let restaurants = state.store.list_restaurants().await?;

    Ok(Json(RestaurantsResponse {
        restaurants: restaurants.iter().map(serialize_restaurant).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/restaurant/{restaurant_id}/menu/JSON/",
    params(
        ("restaurant_id" = i32, Path, description = "Restaurant id"),
    ),
    responses(
        (status = 200, description = "Menu of the restaurant", body = MenuItemsResponse),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    tag = "menu"
)]
#[instrument(skip(state))]
pub async fn list_menu_items(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
) -> Result<Json<MenuItemsResponse>, AppError> {
    let items = state.store.list_menu_items(restaurant_id).await?;

    Ok(Json(MenuItemsResponse {
        menu_items: items.iter().map(serialize_menu_item).collect(),
    }))
}

#[utoipa::path(
    get,
    path = "/restaurant/{restaurant_id}/menu/{menu_id}/JSON/",
    params(
        ("restaurant_id" = i32, Path, description = "Restaurant id"),
        ("menu_id" = i32, Path, description = "Menu item id"),
    ),
    responses(
        (status = 200, description = "The menu item in a one-element list", body = MenuItemResponse),
        (status = 404, description = "No such menu item in this restaurant", body = ApiErrorResponse),
    ),
    tag = "menu"
)]
#[instrument(skip(state))]
pub async fn get_menu_item(
    State(state): State<AppState>,
    Path((restaurant_id, menu_id)): Path<(i32, i32)>,
) -> Result<Json<MenuItemResponse>, AppError> {
    let item = state.store.get_menu_item(restaurant_id, menu_id).await?;

    Ok(Json(MenuItemResponse {
        menu_item: vec![serialize_menu_item(&item)],
    }))
}
