pub mod error;
pub mod models;
pub mod price;
pub mod schema;
pub mod seed;
pub mod serializer;
pub mod store;

pub use error::StoreError;
pub use price::{Price, PriceError};
pub use store::Store;
