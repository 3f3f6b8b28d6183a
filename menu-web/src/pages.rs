//! Server-rendered HTML pages.
//!
//! Markup is intentionally plain; every piece of record text goes through
//! [`escape`] before it is written into a page.

use std::fmt::Write;

use axum::response::Html;
use menu_service::models::{MenuItem, Restaurant};

use crate::flash::Flash;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, flash: Option<Flash>, body: &str) -> Html<String> {
    let flash = flash
        .map(|f| format!("<p class=\"flash\">{}</p>\n", f.message()))
        .unwrap_or_default();
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{flash}{body}</body>\n</html>\n",
        escape(title)
    ))
}

fn text_input(name: &str, value: &str) -> String {
    format!(
        "<label>{name} <input type=\"text\" name=\"{name}\" value=\"{}\"></label><br>\n",
        escape(value)
    )
}

pub fn restaurants(items: &[Restaurant], flash: Option<Flash>) -> Html<String> {
    let mut body = String::from("<h1>Restaurants</h1>\n<a href=\"/restaurant/new/\">Create new restaurant</a>\n<ul>\n");
    for r in items {
        let _ = writeln!(
            body,
            "<li><a href=\"/restaurant/{id}/menu/\">{name}</a> <a href=\"/restaurant/{id}/edit/\">Edit</a> <a href=\"/restaurant/{id}/delete/\">Delete</a></li>",
            id = r.id,
            name = escape(&r.name),
        );
    }
    body.push_str("</ul>\n");
    layout("Restaurants", flash, &body)
}

pub fn menu(restaurant: &Restaurant, items: &[MenuItem], flash: Option<Flash>) -> Html<String> {
    let mut body = format!(
        "<h1>{}</h1>\n<a href=\"/restaurant/{}/menu/new/\">Create new menu item</a>\n",
        escape(&restaurant.name),
        restaurant.id
    );
    if items.is_empty() {
        body.push_str("<p>This restaurant has no menu items yet.</p>\n");
    }
    for i in items {
        let _ = writeln!(
            body,
            "<div class=\"menu-item\"><h3>{name}</h3><p>{description}</p><p>{price}</p><p>{course}</p>\
             <a href=\"/restaurant/{rid}/menu/{id}/edit/\">Edit</a> <a href=\"/restaurant/{rid}/menu/{id}/delete/\">Delete</a></div>",
            name = escape(&i.name),
            description = escape(&i.description),
            price = escape(&i.price.to_string()),
            course = escape(&i.course),
            rid = restaurant.id,
            id = i.id,
        );
    }
    body.push_str("<a href=\"/restaurants/\">Back to restaurants</a>\n");
    layout(&restaurant.name, flash, &body)
}

pub fn new_restaurant() -> Html<String> {
    let body = format!(
        "<h1>New restaurant</h1>\n<form method=\"post\" action=\"/restaurant/new/\">\n{}<input type=\"submit\" value=\"Create\">\n</form>\n",
        text_input("name", "")
    );
    layout("New restaurant", None, &body)
}

pub fn edit_restaurant(restaurant: &Restaurant) -> Html<String> {
    let body = format!(
        "<h1>Edit {}</h1>\n<form method=\"post\" action=\"/restaurant/{}/edit/\">\n{}<input type=\"submit\" value=\"Save\">\n</form>\n",
        escape(&restaurant.name),
        restaurant.id,
        text_input("name", &restaurant.name)
    );
    layout("Edit restaurant", None, &body)
}

pub fn delete_restaurant(restaurant: &Restaurant) -> Html<String> {
    let body = format!(
        "<h1>Delete {}?</h1>\n<p>Its whole menu will be deleted as well.</p>\n<form method=\"post\" action=\"/restaurant/{}/delete/\">\n<input type=\"submit\" value=\"Delete\">\n</form>\n<a href=\"/restaurants/\">Cancel</a>\n",
        escape(&restaurant.name),
        restaurant.id
    );
    layout("Delete restaurant", None, &body)
}

pub fn new_menu_item(restaurant: &Restaurant) -> Html<String> {
    let body = format!(
        "<h1>New menu item for {}</h1>\n<form method=\"post\" action=\"/restaurant/{}/menu/new/\">\n{}{}{}{}<input type=\"submit\" value=\"Create\">\n</form>\n",
        escape(&restaurant.name),
        restaurant.id,
        text_input("name", ""),
        text_input("description", ""),
        text_input("price", ""),
        text_input("course", ""),
    );
    layout("New menu item", None, &body)
}

pub fn edit_menu_item(item: &MenuItem) -> Html<String> {
    let body = format!(
        "<h1>Edit {}</h1>\n<form method=\"post\" action=\"/restaurant/{}/menu/{}/edit/\">\n{}{}{}{}<input type=\"submit\" value=\"Save\">\n</form>\n",
        escape(&item.name),
        item.restaurant_id,
        item.id,
        text_input("name", &item.name),
        text_input("description", &item.description),
        text_input("price", &item.price.to_string()),
        text_input("course", &item.course),
    );
    layout("Edit menu item", None, &body)
}

pub fn delete_menu_item(item: &MenuItem) -> Html<String> {
    let body = format!(
        "<h1>Delete {}?</h1>\n<form method=\"post\" action=\"/restaurant/{}/menu/{}/delete/\">\n<input type=\"submit\" value=\"Delete\">\n</form>\n<a href=\"/restaurant/{}/menu/\">Cancel</a>\n",
        escape(&item.name),
        item.restaurant_id,
        item.id,
        item.restaurant_id
    );
    layout("Delete menu item", None, &body)
}
