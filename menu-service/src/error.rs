use diesel::r2d2::PoolError;

use crate::price::PriceError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,
    #[error("Database error: {0}")]
    Database(#[source] diesel::result::Error),
    #[error("Connection pool error: {0}")]
    Pool(#[from] PoolError),
    #[error(transparent)]
    InvalidPrice(#[from] PriceError),
    #[error("Migration failed: {0}")]
    Migration(String),
    #[error("Blocking task failed: {0}")]
    Blocking(#[from] tokio::task::JoinError),
}

impl From<diesel::result::Error> for StoreError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => StoreError::NotFound,
            other => StoreError::Database(other),
        }
    }
}
