use serde::Serialize;
use utoipa::ToSchema;

use crate::models;

/// JSON form of a restaurant.
#[derive(Debug, Serialize, PartialEq, ToSchema)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
}

/// JSON form of a menu item. The owning restaurant is implied by the route.
#[derive(Debug, Serialize, PartialEq, ToSchema)]
pub struct MenuItem {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Price with a leading currency sign, e.g. `$7.50`
    pub price: String,
    pub course: String,
}

pub fn serialize_restaurant(restaurant: &models::Restaurant) -> Restaurant {
    Restaurant {
        id: restaurant.id,
        name: restaurant.name.clone(),
    }
}

pub fn serialize_menu_item(item: &models::MenuItem) -> MenuItem {
    MenuItem {
        id: item.id,
        name: item.name.clone(),
        description: item.description.clone(),
        price: item.price.to_string(),
        course: item.course.clone(),
    }
}
