use diesel::prelude::*;

use crate::price::Price;
use crate::schema::{menu_items, restaurants};

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq, Clone)]
#[diesel(table_name = restaurants)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant {
    pub name: String,
}

/// Fields to overwrite on an existing restaurant; `None` leaves the column alone.
#[derive(AsChangeset, Default, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct RestaurantChanges {
    pub name: Option<String>,
}

impl RestaurantChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, PartialEq, Clone)]
#[diesel(belongs_to(Restaurant))]
#[diesel(table_name = menu_items)]
pub struct MenuItem {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub course: String,
    pub restaurant_id: i32,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = menu_items)]
pub struct NewMenuItem {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub course: String,
    pub restaurant_id: i32,
}

/// Fields to overwrite on an existing menu item; `None` leaves the column alone.
#[derive(AsChangeset, Default, Debug, PartialEq)]
#[diesel(table_name = menu_items)]
pub struct MenuItemChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub course: Option<String>,
}

impl MenuItemChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.course.is_none()
    }
}
