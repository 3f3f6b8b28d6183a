pub mod api;
pub mod menu_item;
pub mod restaurant;

use axum::{Router, extract::FromRef, response::Json, routing::get};
use axum_extra::extract::cookie::Key;
use menu_service::Store;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Per-request context handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub cookie_key: Key,
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(api::router())
        .merge(restaurant::router())
        .merge(menu_item::router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        api::list_restaurants,
        api::list_menu_items,
        api::get_menu_item,
    ),
    components(
        schemas(
            crate::models::RestaurantsResponse,
            crate::models::MenuItemsResponse,
            crate::models::MenuItemResponse,
            crate::models::ApiErrorResponse,
            menu_service::serializer::Restaurant,
            menu_service::serializer::MenuItem,
        )
    ),
    tags(
        (name = "restaurants", description = "Restaurant listing"),
        (name = "menu", description = "Menu listing")
    ),
    info(
        title = "Restaurant Menu API",
        description = "Read-only JSON view of restaurants and their menus",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use axum::response::Response;
    use serde_json::{Value, json};
    use tempfile::TempDir;
    use tower::ServiceExt;

    async fn setup_app() -> (TempDir, Store, Router) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.db");
        let store = Store::connect(path.to_str().unwrap()).unwrap();
        store.run_migrations().await.unwrap();
        let app = app(AppState {
            store: store.clone(),
            cookie_key: Key::from(&[42u8; 64]),
        });
        (dir, store, app)
    }

    async fn get(app: &Router, uri: &str) -> Response {
        app.clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn get_with_cookie(app: &Router, uri: &str, cookie: &str) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(header::COOKIE, cookie)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn post_form(app: &Router, uri: &str, body: &str) -> Response {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
    }

    /// `name=value` part of the response's first Set-Cookie header.
    fn cookie_pair(response: &Response) -> String {
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    async fn create_restaurant(app: &Router, name: &str) -> i64 {
        let response = post_form(app, "/restaurant/new/", &format!("name={name}")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let restaurants = body_json(get(app, "/restaurants/JSON/").await).await;
        restaurants["Restaurants"].as_array().unwrap().last().unwrap()["id"]
            .as_i64()
            .unwrap()
    }

    async fn create_item(app: &Router, restaurant_id: i64, body: &str) -> Value {
        let response = post_form(
            app,
            &format!("/restaurant/{restaurant_id}/menu/new/"),
            body,
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let menu = body_json(get(app, &format!("/restaurant/{restaurant_id}/menu/JSON/")).await).await;
        menu["MenuItems"].as_array().unwrap().last().unwrap().clone()
    }

    #[tokio::test]
    async fn test_create_restaurant_end_to_end() {
        let (_dir, _store, app) = setup_app().await;

        let response = post_form(&app, "/restaurant/new/", "name=Cafe+X").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/restaurants/");
        let flash_cookie = cookie_pair(&response);

        let restaurants = body_json(get(&app, "/restaurants/JSON/").await).await;
        let entries = restaurants["Restaurants"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["name"], "Cafe X");
        assert!(entries[0]["id"].is_i64());

        let page = get_with_cookie(&app, "/restaurants/", &flash_cookie).await;
        assert_eq!(page.status(), StatusCode::OK);
        assert!(page.headers().contains_key(header::SET_COOKIE));
        let html = body_text(page).await;
        assert!(html.contains("new restaurant created"));
        assert!(html.contains("Cafe X"));
    }

    #[tokio::test]
    async fn test_tampered_flash_is_ignored() {
        let (_dir, _store, app) = setup_app().await;
        let page = get_with_cookie(&app, "/", "flash=restaurant-created").await;
        assert_eq!(page.status(), StatusCode::OK);
        assert!(!body_text(page).await.contains("new restaurant created"));
    }

    #[tokio::test]
    async fn test_empty_menu_json() {
        let (_dir, _store, app) = setup_app().await;
        let id = create_restaurant(&app, "Urban+Burger").await;

        let response = get(&app, &format!("/restaurant/{id}/menu/JSON/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({"MenuItems": []}));
    }

    #[tokio::test]
    async fn test_single_menu_item_json_shape() {
        let (_dir, _store, app) = setup_app().await;
        let rid = create_restaurant(&app, "Urban+Burger").await;
        let item = create_item(
            &app,
            rid,
            "name=Veggie+Burger&description=Grilled+patty&price=%247.50&course=Entree",
        )
        .await;
        let mid = item["id"].as_i64().unwrap();

        let response = get(&app, &format!("/restaurant/{rid}/menu/{mid}/JSON/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "MenuItem": [{
                    "id": mid,
                    "name": "Veggie Burger",
                    "description": "Grilled patty",
                    "price": "$7.50",
                    "course": "Entree",
                }]
            })
        );
    }

    #[tokio::test]
    async fn test_edit_menu_item_price_only() {
        let (_dir, _store, app) = setup_app().await;
        let rid = create_restaurant(&app, "Urban+Burger").await;
        let item = create_item(
            &app,
            rid,
            "name=Fries&description=With+garlic&price=2.99&course=Appetizer",
        )
        .await;
        let mid = item["id"].as_i64().unwrap();

        let response = post_form(
            &app,
            &format!("/restaurant/{rid}/menu/{mid}/edit/"),
            "name=&description=&price=3.49&course=",
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), format!("/restaurant/{rid}/menu/"));

        let updated = body_json(get(&app, &format!("/restaurant/{rid}/menu/{mid}/JSON/")).await).await;
        assert_eq!(
            updated["MenuItem"][0],
            json!({
                "id": mid,
                "name": "Fries",
                "description": "With garlic",
                "price": "$3.49",
                "course": "Appetizer",
            })
        );
    }

    #[tokio::test]
    async fn test_invalid_price_is_rejected_without_changes() {
        let (_dir, _store, app) = setup_app().await;
        let rid = create_restaurant(&app, "Urban+Burger").await;

        let response = post_form(
            &app,
            &format!("/restaurant/{rid}/menu/new/"),
            "name=Soup&description=Hot&price=cheap&course=Appetizer",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let item = create_item(&app, rid, "name=Soup&description=Hot&price=4&course=Appetizer").await;
        let mid = item["id"].as_i64().unwrap();
        let response = post_form(
            &app,
            &format!("/restaurant/{rid}/menu/{mid}/edit/"),
            "name=Stew&price=cheap",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let menu = body_json(get(&app, &format!("/restaurant/{rid}/menu/JSON/")).await).await;
        assert_eq!(menu["MenuItems"].as_array().unwrap().len(), 1);
        assert_eq!(menu["MenuItems"][0]["name"], "Soup");
        assert_eq!(menu["MenuItems"][0]["price"], "$4.00");
    }

    #[tokio::test]
    async fn test_huge_exponent_price_is_rejected() {
        let (_dir, _store, app) = setup_app().await;
        let rid = create_restaurant(&app, "Urban+Burger").await;

        let response = post_form(
            &app,
            &format!("/restaurant/{rid}/menu/new/"),
            "name=Soup&description=Hot&price=1e9999999&course=Appetizer",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let item = create_item(&app, rid, "name=Water&description=Tap&price=0&course=Beverage").await;
        assert_eq!(item["price"], "$0.00");
    }

    #[tokio::test]
    async fn test_menu_item_from_other_restaurant_is_not_found() {
        let (_dir, _store, app) = setup_app().await;
        let burger = create_restaurant(&app, "Urban+Burger").await;
        let panda = create_restaurant(&app, "Panda+Garden").await;
        let item = create_item(&app, burger, "name=Fries&price=2.99").await;
        let mid = item["id"].as_i64().unwrap();

        for uri in [
            format!("/restaurant/{panda}/menu/{mid}/JSON/"),
            format!("/restaurant/{panda}/menu/{mid}/edit/"),
            format!("/restaurant/{panda}/menu/{mid}/delete/"),
        ] {
            assert_eq!(get(&app, &uri).await.status(), StatusCode::NOT_FOUND, "{uri}");
        }

        let response = post_form(
            &app,
            &format!("/restaurant/{panda}/menu/{mid}/delete/"),
            "",
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = get(&app, &format!("/restaurant/{burger}/menu/{mid}/JSON/")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_delete_restaurant_cascades() {
        let (_dir, store, app) = setup_app().await;
        let rid = create_restaurant(&app, "Urban+Burger").await;
        create_item(&app, rid, "name=Fries&price=2.99").await;

        let confirm = get(&app, &format!("/restaurant/{rid}/delete/")).await;
        assert_eq!(confirm.status(), StatusCode::OK);

        let response = post_form(&app, &format!("/restaurant/{rid}/delete/"), "").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/restaurants/");

        let restaurants = body_json(get(&app, "/restaurants/JSON/").await).await;
        assert_eq!(restaurants, json!({"Restaurants": []}));
        let response = get(&app, &format!("/restaurant/{rid}/menu/JSON/")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(store.list_restaurants().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_edit_restaurant_ignores_empty_name() {
        let (_dir, _store, app) = setup_app().await;
        let rid = create_restaurant(&app, "Urban+Burger").await;

        let response = post_form(&app, &format!("/restaurant/{rid}/edit/"), "name=").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let restaurants = body_json(get(&app, "/restaurants/JSON/").await).await;
        assert_eq!(restaurants["Restaurants"][0]["name"], "Urban Burger");

        let response = post_form(&app, &format!("/restaurant/{rid}/edit/"), "name=Burger+Bar").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let restaurants = body_json(get(&app, "/restaurants/JSON/").await).await;
        assert_eq!(restaurants["Restaurants"][0]["name"], "Burger Bar");
    }

    #[tokio::test]
    async fn test_pages_render() {
        let (_dir, _store, app) = setup_app().await;
        let rid = create_restaurant(&app, "Urban+Burger").await;
        let item = create_item(&app, rid, "name=Fries&price=2.99").await;
        let mid = item["id"].as_i64().unwrap();

        for uri in [
            "/".to_string(),
            "/restaurants/".to_string(),
            "/restaurant/new/".to_string(),
            format!("/restaurant/{rid}/"),
            format!("/restaurant/{rid}/menu/"),
            format!("/restaurant/{rid}/edit/"),
            format!("/restaurant/{rid}/menu/new/"),
            format!("/restaurant/{rid}/menu/{mid}/edit/"),
            format!("/restaurant/{rid}/menu/{mid}/delete/"),
        ] {
            assert_eq!(get(&app, &uri).await.status(), StatusCode::OK, "{uri}");
        }

        let html = body_text(get(&app, &format!("/restaurant/{rid}/menu/{mid}/edit/")).await).await;
        assert!(html.contains("value=\"$2.99\""));
    }

    #[tokio::test]
    async fn test_non_integer_and_missing_ids_are_not_found() {
        let (_dir, _store, app) = setup_app().await;

        for uri in [
            "/restaurant/abc/",
            "/restaurant/abc/menu/JSON/",
            "/restaurant/1/menu/xyz/JSON/",
            "/restaurant/1.5/edit/",
            "/restaurant/99/",
            "/restaurant/99/menu/JSON/",
            "/restaurant/99/menu/new/",
            "/restaurant/99/menu/1/JSON/",
        ] {
            assert_eq!(get(&app, uri).await.status(), StatusCode::NOT_FOUND, "{uri}");
        }

        let response = post_form(&app, "/restaurant/99/menu/new/", "name=Soup&price=1").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let response = post_form(&app, "/restaurant/abc/delete/", "").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_openapi_document() {
        let (_dir, _store, app) = setup_app().await;
        let doc = body_json(get(&app, "/api-docs/openapi.json").await).await;
        assert!(doc["paths"]["/restaurants/JSON/"].is_object());
        assert!(doc["paths"]["/restaurant/{restaurant_id}/menu/{menu_id}/JSON/"].is_object());
    }
}
