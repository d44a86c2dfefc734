use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use futures::TryStreamExt;
use mongodb::bson::doc;
use mongodb::Collection;

use crate::db::PRODUCT_COLLECTION;
use crate::error::ApiError;
use crate::ids::LookupId;
use crate::models::{Product, ProductOut};
use crate::AppState;

async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<ProductOut>>, ApiError> {
    let Some(db) = state.store.get() else {
        return Ok(Json(Vec::new()));
    };

    let products: Collection<Product> = db.collection(PRODUCT_COLLECTION);
    let mut cursor = products.find(None, None).await?;
    let mut out = Vec::new();
    while let Some(product) = cursor.try_next().await? {
        out.push(ProductOut::from(product));
    }

    Ok(Json(out))
}

async fn get_product(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<ProductOut>, ApiError> {
    let db = state
        .store
        .get()
        .ok_or(ApiError::NotFound("Product not found"))?;

    let products: Collection<Product> = db.collection(PRODUCT_COLLECTION);
    let filter = doc! { "_id": LookupId::parse(&product_id) };
    let product = products
        .find_one(filter, None)
        .await
        .ok()
        .flatten()
        .ok_or(ApiError::NotFound("Product not found"))?;

    Ok(Json(ProductOut::from(product)))
}

pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/:id", get(get_product))
}
