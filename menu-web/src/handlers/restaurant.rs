use axum::{
    Form, Router,
    extract::State,
    response::{Html, Redirect},
    routing::get,
};
use axum_extra::extract::cookie::SignedCookieJar;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::extract::Path;
use crate::flash::Flash;
use crate::models::RestaurantForm;
use crate::pages;

use super::AppState;

pub const RESTAURANTS_PAGE: &str = "/restaurants/";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(show_restaurants))
        .route("/restaurants/", get(show_restaurants))
        .route(
            "/restaurant/new/",
            get(new_restaurant_form).post(create_restaurant),
        )
        .route(
            "/restaurant/{restaurant_id}/edit/",
            get(edit_restaurant_form).post(edit_restaurant),
        )
        .route(
            "/restaurant/{restaurant_id}/delete/",
            get(delete_restaurant_form).post(delete_restaurant),
        )
}

#[instrument(skip(state, jar))]
pub async fn show_restaurants(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Html<String>), AppError> {
    let restaurants = state.store.list_restaurants().await?;
    let (jar, flash) = Flash::take(jar);
    Ok((jar, pages::restaurants(&restaurants, flash)))
}

pub async fn new_restaurant_form() -> Html<String> {
    pages::new_restaurant()
}

#[instrument(skip(state, jar))]
pub async fn create_restaurant(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<RestaurantForm>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    let restaurant = state.store.create_restaurant(form.into_new()).await?;
    info!(id = restaurant.id, "restaurant created");

    Ok((
        Flash::RestaurantCreated.set(jar),
        Redirect::to(RESTAURANTS_PAGE),
    ))
}

#[instrument(skip(state))]
pub async fn edit_restaurant_form(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let restaurant = state.store.get_restaurant(restaurant_id).await?;
    Ok(pages::edit_restaurant(&restaurant))
}

#[instrument(skip(state, jar))]
pub async fn edit_restaurant(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(restaurant_id): Path<i32>,
    Form(form): Form<RestaurantForm>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    state
        .store
        .update_restaurant(restaurant_id, form.into_changes())
        .await?;
    info!(id = restaurant_id, "restaurant edited");

    Ok((
        Flash::RestaurantEdited.set(jar),
        Redirect::to(RESTAURANTS_PAGE),
    ))
}

#[instrument(skip(state))]
pub async fn delete_restaurant_form(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let restaurant = state.store.get_restaurant(restaurant_id).await?;
    Ok(pages::delete_restaurant(&restaurant))
}

#[instrument(skip(state, jar))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(restaurant_id): Path<i32>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    state.store.delete_restaurant(restaurant_id).await?;
    info!(id = restaurant_id, "restaurant deleted");

    Ok((
        Flash::RestaurantDeleted.set(jar),
        Redirect::to(RESTAURANTS_PAGE),
    ))
}
