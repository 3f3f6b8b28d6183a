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
use crate::models::MenuItemForm;
use crate::pages;

use super::AppState;

pub fn menu_page(restaurant_id: i32) -> String {
    format!("/restaurant/{restaurant_id}/menu/")
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurant/{restaurant_id}/", get(show_menu))
        .route("/restaurant/{restaurant_id}/menu/", get(show_menu))
        .route(
            "/restaurant/{restaurant_id}/menu/new/",
            get(new_menu_item_form).post(create_menu_item),
        )
        .route(
            "/restaurant/{restaurant_id}/menu/{menu_id}/edit/",
            get(edit_menu_item_form).post(edit_menu_item),
        )
        .route(
            "/restaurant/{restaurant_id}/menu/{menu_id}/delete/",
            get(delete_menu_item_form).post(delete_menu_item),
        )
}

#[instrument(skip(state, jar))]
pub async fn show_menu(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(restaurant_id): Path<i32>,
) -> Result<(SignedCookieJar, Html<String>), AppError> {
    let (restaurant, items) = state.store.get_menu(restaurant_id).await?;
    let (jar, flash) = Flash::take(jar);
    Ok((jar, pages::menu(&restaurant, &items, flash)))
}

#[instrument(skip(state))]
pub async fn new_menu_item_form(
    State(state): State<AppState>,
    Path(restaurant_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let restaurant = state.store.get_restaurant(restaurant_id).await?;
    Ok(pages::new_menu_item(&restaurant))
}

#[instrument(skip(state, jar))]
pub async fn create_menu_item(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path(restaurant_id): Path<i32>,
    Form(form): Form<MenuItemForm>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    let item = state
        .store
        .create_menu_item(form.into_new(restaurant_id)?)
        .await?;
    info!(id = item.id, restaurant_id, "menu item created");

    Ok((
        Flash::MenuItemCreated.set(jar),
        Redirect::to(&menu_page(restaurant_id)),
    ))
}

#[instrument(skip(state))]
pub async fn edit_menu_item_form(
    State(state): State<AppState>,
    Path((restaurant_id, menu_id)): Path<(i32, i32)>,
) -> Result<Html<String>, AppError> {
    let item = state.store.get_menu_item(restaurant_id, menu_id).await?;
    Ok(pages::edit_menu_item(&item))
}

#[instrument(skip(state, jar))]
pub async fn edit_menu_item(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path((restaurant_id, menu_id)): Path<(i32, i32)>,
    Form(form): Form<MenuItemForm>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    state
        .store
        .update_menu_item(restaurant_id, menu_id, form.into_changes()?)
        .await?;
    info!(id = menu_id, restaurant_id, "menu item edited");

    Ok((
        Flash::MenuItemEdited.set(jar),
        Redirect::to(&menu_page(restaurant_id)),
    ))
}

#[instrument(skip(state))]
pub async fn delete_menu_item_form(
    State(state): State<AppState>,
    Path((restaurant_id, menu_id)): Path<(i32, i32)>,
) -> Result<Html<String>, AppError> {
    let item = state.store.get_menu_item(restaurant_id, menu_id).await?;
    Ok(pages::delete_menu_item(&item))
}

#[instrument(skip(state, jar))]
pub async fn delete_menu_item(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Path((restaurant_id, menu_id)): Path<(i32, i32)>,
) -> Result<(SignedCookieJar, Redirect), AppError> {
    state.store.delete_menu_item(restaurant_id, menu_id).await?;
    info!(id = menu_id, restaurant_id, "menu item deleted");

    Ok((
        Flash::MenuItemDeleted.set(jar),
        Redirect::to(&menu_page(restaurant_id)),
    ))
}
