use menu_service::models::{MenuItemChanges, NewMenuItem, NewRestaurant, RestaurantChanges};
use menu_service::{Price, PriceError, serializer};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Submitted restaurant form. A missing field reads as an empty string.
#[derive(Debug, Default, Deserialize)]
pub struct RestaurantForm {
    #[serde(default)]
    pub name: String,
}

impl RestaurantForm {
    pub fn into_new(self) -> NewRestaurant {
        NewRestaurant { name: self.name }
    }

    pub fn into_changes(self) -> RestaurantChanges {
        RestaurantChanges {
            name: non_empty(self.name),
        }
    }
}

/// Submitted menu item form. A missing field reads as an empty string.
#[derive(Debug, Default, Deserialize)]
pub struct MenuItemForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub course: String,
}

impl MenuItemForm {
    pub fn into_new(self, restaurant_id: i32) -> Result<NewMenuItem, PriceError> {
        Ok(NewMenuItem {
            price: self.price.parse::<Price>()?,
            name: self.name,
            description: self.description,
            course: self.course,
            restaurant_id,
        })
    }

    /// Only non-empty fields become changes; a non-empty price must parse.
    pub fn into_changes(self) -> Result<MenuItemChanges, PriceError> {
        Ok(MenuItemChanges {
            price: non_empty(self.price)
                .map(|p| p.parse::<Price>())
                .transpose()?,
            name: non_empty(self.name),
            description: non_empty(self.description),
            course: non_empty(self.course),
        })
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RestaurantsResponse {
    #[serde(rename = "Restaurants")]
    pub restaurants: Vec<serializer::Restaurant>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuItemsResponse {
    #[serde(rename = "MenuItems")]
    pub menu_items: Vec<serializer::MenuItem>,
}

/// Single menu item, still wrapped in a one-element list.
#[derive(Debug, Serialize, ToSchema)]
pub struct MenuItemResponse {
    #[serde(rename = "MenuItem")]
    pub menu_item: Vec<serializer::MenuItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}
