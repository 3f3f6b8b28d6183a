use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::{insert_into, prelude::*, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::{debug, instrument};

use crate::error::StoreError;
use crate::models::{
    MenuItem, MenuItemChanges, NewMenuItem, NewRestaurant, Restaurant, RestaurantChanges,
};
use crate::schema::{menu_items, restaurants};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

const POOL_SIZE: u32 = 8;
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

#[derive(Debug)]
struct ConnectionOptions {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {}; PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON;",
            self.busy_timeout.as_millis()
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Handle to the restaurant database.
///
/// Cloning is cheap; clones share one connection pool. Every operation checks
/// a connection out for the duration of a single blocking closure, so no
/// connection outlives the call that acquired it.
#[derive(Clone)]
pub struct Store {
    pool: DbPool,
}

impl Store {
    pub fn connect(database_url: &str) -> Result<Self, StoreError> {
        let manager = ConnectionManager::<SqliteConnection>::new(database_url);
        let pool = Pool::builder()
            .max_size(POOL_SIZE)
            .connection_customizer(Box::new(ConnectionOptions {
                busy_timeout: BUSY_TIMEOUT,
            }))
            .build(manager)?;
        Ok(Self { pool })
    }

    /// Runs `f` on a pooled connection off the async runtime.
    pub(crate) async fn interact<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, StoreError> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            f(&mut conn)
        })
        .await?
    }

    /// Applies pending migrations, returning how many ran.
    pub async fn run_migrations(&self) -> Result<usize, StoreError> {
        self.interact(|conn| {
            let applied = conn
                .run_pending_migrations(MIGRATIONS)
                .map_err(|e| StoreError::Migration(e.to_string()))?;
            Ok(applied.len())
        })
        .await
    }

    pub async fn list_restaurants(&self) -> Result<Vec<Restaurant>, StoreError> {
        self.interact(|conn| {
            Ok(restaurants::table
                .order(restaurants::id.asc())
                .select(Restaurant::as_select())
                .load(conn)?)
        })
        .await
    }

    pub async fn get_restaurant(&self, restaurant_id: i32) -> Result<Restaurant, StoreError> {
        self.interact(move |conn| load_restaurant(conn, restaurant_id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn create_restaurant(
        &self,
        restaurant: NewRestaurant,
    ) -> Result<Restaurant, StoreError> {
        let created = self
            .interact(move |conn| {
                conn.immediate_transaction(|conn| {
                    Ok(insert_into(restaurants::table)
                        .values(&restaurant)
                        .returning(Restaurant::as_returning())
                        .get_result(conn)?)
                })
            })
            .await?;
        debug!(id = created.id, "restaurant created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update_restaurant(
        &self,
        restaurant_id: i32,
        changes: RestaurantChanges,
    ) -> Result<Restaurant, StoreError> {
        self.interact(move |conn| {
            conn.immediate_transaction(|conn| {
                let current = load_restaurant(conn, restaurant_id)?;
                if changes.is_empty() {
                    return Ok(current);
                }
                Ok(diesel::update(&current)
                    .set(&changes)
                    .returning(Restaurant::as_returning())
                    .get_result(conn)?)
            })
        })
        .await
    }

    /// Deletes a restaurant together with its whole menu.
    #[instrument(skip(self))]
    pub async fn delete_restaurant(&self, restaurant_id: i32) -> Result<Restaurant, StoreError> {
        let (restaurant, removed_items) = self
            .interact(move |conn| {
                conn.immediate_transaction(|conn| {
                    let restaurant = load_restaurant(conn, restaurant_id)?;
                    let removed_items = diesel::delete(
                        menu_items::table.filter(menu_items::restaurant_id.eq(restaurant.id)),
                    )
                    .execute(conn)?;
                    diesel::delete(&restaurant).execute(conn)?;
                    Ok((restaurant, removed_items))
                })
            })
            .await?;
        debug!(id = restaurant.id, removed_items, "restaurant deleted");
        Ok(restaurant)
    }

    /// Loads a restaurant and its menu items in one read transaction.
    pub async fn get_menu(
        &self,
        restaurant_id: i32,
    ) -> Result<(Restaurant, Vec<MenuItem>), StoreError> {
        self.interact(move |conn| {
            conn.transaction(|conn| {
                let restaurant = load_restaurant(conn, restaurant_id)?;
                let items = MenuItem::belonging_to(&restaurant)
                    .order(menu_items::id.asc())
                    .select(MenuItem::as_select())
                    .load(conn)?;
                Ok((restaurant, items))
            })
        })
        .await
    }

    pub async fn list_menu_items(&self, restaurant_id: i32) -> Result<Vec<MenuItem>, StoreError> {
        let (_, items) = self.get_menu(restaurant_id).await?;
        Ok(items)
    }

    /// Looks up a menu item within the given restaurant; an item belonging to
    /// another restaurant is reported as missing.
    pub async fn get_menu_item(
        &self,
        restaurant_id: i32,
        menu_item_id: i32,
    ) -> Result<MenuItem, StoreError> {
        self.interact(move |conn| load_menu_item(conn, restaurant_id, menu_item_id))
            .await
    }

    #[instrument(skip(self))]
    pub async fn create_menu_item(&self, item: NewMenuItem) -> Result<MenuItem, StoreError> {
        let created = self
            .interact(move |conn| {
                conn.immediate_transaction(|conn| {
                    load_restaurant(conn, item.restaurant_id)?;
                    Ok(insert_into(menu_items::table)
                        .values(&item)
                        .returning(MenuItem::as_returning())
                        .get_result(conn)?)
                })
            })
            .await?;
        debug!(
            id = created.id,
            restaurant_id = created.restaurant_id,
            "menu item created"
        );
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn update_menu_item(
        &self,
        restaurant_id: i32,
        menu_item_id: i32,
        changes: MenuItemChanges,
    ) -> Result<MenuItem, StoreError> {
        self.interact(move |conn| {
            conn.immediate_transaction(|conn| {
                let current = load_menu_item(conn, restaurant_id, menu_item_id)?;
                if changes.is_empty() {
                    return Ok(current);
                }
                Ok(diesel::update(&current)
                    .set(&changes)
                    .returning(MenuItem::as_returning())
                    .get_result(conn)?)
            })
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_menu_item(
        &self,
        restaurant_id: i32,
        menu_item_id: i32,
    ) -> Result<MenuItem, StoreError> {
        self.interact(move |conn| {
            conn.immediate_transaction(|conn| {
                let item = load_menu_item(conn, restaurant_id, menu_item_id)?;
                diesel::delete(&item).execute(conn)?;
                Ok(item)
            })
        })
        .await
    }
}

fn load_restaurant(conn: &mut SqliteConnection, id: i32) -> Result<Restaurant, StoreError> {
    Ok(restaurants::table
        .find(id)
        .select(Restaurant::as_select())
        .first(conn)?)
}

fn load_menu_item(
    conn: &mut SqliteConnection,
    restaurant_id: i32,
    id: i32,
) -> Result<MenuItem, StoreError> {
    Ok(menu_items::table
        .filter(menu_items::id.eq(id))
        .filter(menu_items::restaurant_id.eq(restaurant_id))
        .select(MenuItem::as_select())
        .first(conn)?)
}
