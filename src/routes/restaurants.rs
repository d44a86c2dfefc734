use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::Collection;

use crate::db::{PRODUCT_COLLECTION, RESTAURANT_COLLECTION};
use crate::error::ApiError;
use crate::ids::LookupId;
use crate::models::{Product, ProductOut, Restaurant, RestaurantOut};
use crate::AppState;

async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<RestaurantOut>>, ApiError> {
    let Some(db) = state.store.get() else {
        return Ok(Json(Vec::new()));
    };

    let restaurants: Collection<Restaurant> = db.collection(RESTAURANT_COLLECTION);
    let mut cursor = restaurants.find(None, None).await?;
    let mut out = Vec::new();
    while let Some(restaurant) = cursor.try_next().await? {
        out.push(RestaurantOut::from(restaurant));
    }

    Ok(Json(out))
}

async fn get_restaurant(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
) -> Result<Json<RestaurantOut>, ApiError> {
    let db = state
        .store
        .get()
        .ok_or(ApiError::NotFound("Restaurant not found"))?;

    let restaurants: Collection<Restaurant> = db.collection(RESTAURANT_COLLECTION);
    // A malformed id falls back to a literal lookup, which simply misses.
    let filter = doc! { "_id": LookupId::parse(&restaurant_id) };
    let restaurant = restaurants
        .find_one(filter, None)
        .await
        .ok()
        .flatten()
        .ok_or(ApiError::NotFound("Restaurant not found"))?;

    Ok(Json(RestaurantOut::from(restaurant)))
}

async fn list_restaurant_products(
    State(state): State<AppState>,
    Path(restaurant_id): Path<String>,
) -> Result<Json<Vec<ProductOut>>, ApiError> {
    let Some(db) = state.store.get() else {
        return Ok(Json(Vec::new()));
    };

    let products: Collection<Product> = db.collection(PRODUCT_COLLECTION);
    // Literal string comparison against the stored reference; the path
    // value is not parsed as an ObjectId.
    let mut cursor = products
        .find(doc! { "restaurant_id": &restaurant_id }, None)
        .await?;
    let mut out = Vec::new();
    while let Some(product) = cursor.try_next().await? {
        out.push(ProductOut::from(product));
    }

    Ok(Json(out))
}

pub fn restaurant_routes() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route("/restaurants/:id", get(get_restaurant))
        .route("/restaurants/:id/products", get(list_restaurant_products))
}
