//! MongoDB connection handling.
//!
//! The service keeps running when no store is reachable: list endpoints
//! return empty results and mutating endpoints answer with a 500. `Store`
//! makes that distinction explicit instead of threading an `Option` around.

use std::env;
use std::sync::Arc;

use anyhow::Result;
use mongodb::{options::ClientOptions, Client, Database};

use crate::error::ApiError;

pub const USER_COLLECTION: &str = "user";
pub const RESTAURANT_COLLECTION: &str = "restaurant";
pub const PRODUCT_COLLECTION: &str = "product";

const DEFAULT_DATABASE: &str = "restaurant_db";

#[derive(Clone)]
pub enum Store {
    Connected(Arc<Database>),
    Unavailable,
}

impl Store {
    pub fn get(&self) -> Option<&Database> {
        match self {
            Store::Connected(db) => Some(db),
            Store::Unavailable => None,
        }
    }

    /// Handle for endpoints that cannot degrade gracefully.
    pub fn require(&self) -> Result<&Database, ApiError> {
        self.get().ok_or(ApiError::StoreUnavailable)
    }
}

pub async fn connect_to_mongo() -> Result<Database> {
    let uri = env::var("DATABASE_URL")?;

    let client_options = ClientOptions::parse(&uri).await?;
    let database_name = client_options
        .default_database
        .clone()
        .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

    let client = Client::with_options(client_options)?;
    let db = client.database(&database_name);

    // Test the connection
    db.run_command(mongodb::bson::doc! { "ping": 1 }, None)
        .await?;

    Ok(db)
}
