use diesel::{insert_into, prelude::*};
use tracing::info;

use crate::error::StoreError;
use crate::models::{NewMenuItem, NewRestaurant, Restaurant};
use crate::schema::{menu_items, restaurants};
use crate::store::Store;

struct SampleItem {
    name: &'static str,
    description: &'static str,
    price: &'static str,
    course: &'static str,
}

const fn item(
    name: &'static str,
    description: &'static str,
    price: &'static str,
    course: &'static str,
) -> SampleItem {
    SampleItem {
        name,
        description,
        price,
        course,
    }
}

const SAMPLE_MENUS: &[(&str, &[SampleItem])] = &[
    (
        "Urban Burger",
        &[
            item(
                "Veggie Burger",
                "Juicy grilled veggie patty with tomato mayo and lettuce",
                "$7.50",
                "Entree",
            ),
            item("French Fries", "with garlic and parmesan", "$2.99", "Appetizer"),
            item(
                "Chicken Burger",
                "Juicy grilled chicken patty with tomato mayo and lettuce",
                "$5.50",
                "Entree",
            ),
            item(
                "Chocolate Cake",
                "fresh baked and served with ice cream",
                "$3.99",
                "Dessert",
            ),
            item("Iced Tea", "with Lemon", "$0.99", "Beverage"),
        ],
    ),
    (
        "Super Stir Fry",
        &[
            item(
                "Chicken Stir Fry",
                "With your choice of noodles vegetables and sauces",
                "$7.99",
                "Entree",
            ),
            item(
                "Peking Duck",
                "A famous duck dish from Beijing that has been prepared since the imperial era",
                "$25",
                "Entree",
            ),
            item(
                "Spicy Tuna Roll",
                "Seared rare ahi, avocado, edamame, cucumber with wasabi soy sauce",
                "$15",
                "Entree",
            ),
        ],
    ),
    (
        "Panda Garden",
        &[
            item(
                "General Tso's Chicken",
                "Chicken in a sweet and spicy sauce",
                "$8.95",
                "Entree",
            ),
            item(
                "Veggie Dumplings",
                "Steamed dumplings filled with cabbage and carrots",
                "$4.25",
                "Appetizer",
            ),
        ],
    ),
];

impl Store {
    /// Fills an empty database with a few sample restaurants and menus.
    ///
    /// Returns the number of restaurants inserted; a database that already
    /// holds restaurants is left untouched and yields 0.
    pub async fn seed_sample_data(&self) -> Result<usize, StoreError> {
        let inserted = self
            .interact(|conn| {
                conn.immediate_transaction(|conn| {
                    let existing: i64 = restaurants::table.count().get_result(conn)?;
                    if existing > 0 {
                        return Ok(0);
                    }

                    for (name, items) in SAMPLE_MENUS {
                        let restaurant = insert_into(restaurants::table)
                            .values(&NewRestaurant {
                                name: name.to_string(),
                            })
                            .returning(Restaurant::as_returning())
                            .get_result(conn)?;
                        let menu = items
                            .iter()
                            .map(|i| {
                                Ok(NewMenuItem {
                                    name: i.name.to_string(),
                                    description: i.description.to_string(),
                                    price: i.price.parse()?,
                                    course: i.course.to_string(),
                                    restaurant_id: restaurant.id,
                                })
                            })
                            .collect::<Result<Vec<_>, StoreError>>()?;
                        insert_into(menu_items::table).values(&menu).execute(conn)?;
                    }
                    Ok(SAMPLE_MENUS.len())
                })
            })
            .await?;
        info!(restaurants = inserted, "sample data seeded");
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use crate::store::tests::setup_store;

    #[tokio::test]
    async fn test_seed_only_fills_empty_database() {
        let (_dir, store) = setup_store().await;

        assert_eq!(store.seed_sample_data().await.unwrap(), 3);
        assert_eq!(store.seed_sample_data().await.unwrap(), 0);

        let restaurants = store.list_restaurants().await.unwrap();
        assert_eq!(restaurants.len(), 3);
        assert_eq!(restaurants[0].name, "Urban Burger");

        let menu = store.list_menu_items(restaurants[0].id).await.unwrap();
        assert_eq!(menu.len(), 5);
        assert!(menu
            .iter()
            .any(|i| i.name == "Iced Tea" && i.price.to_string() == "$0.99"));
    }
}
