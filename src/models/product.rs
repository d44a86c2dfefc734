use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// A menu item in the `product` collection. Written only by the startup
/// seed.
///
/// `restaurant_id` holds the owning restaurant's id as a hex string; the
/// reference is never checked against the `restaurant` collection, so it
/// may dangle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: Option<String>,
    /// Price in dollars, never negative.
    pub price: f64,
    pub image: Option<String>,
    pub restaurant_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// Response shape for product endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOut {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub price: f64,
    pub image: Option<String>,
    pub restaurant_id: Option<String>,
    pub tags: Vec<String>,
}

impl From<Product> for ProductOut {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            title: product.title,
            description: product.description,
            price: product.price,
            image: product.image,
            restaurant_id: product.restaurant_id,
            tags: product.tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_keeps_restaurant_reference_verbatim() {
        let now = DateTime::now();
        let product = Product {
            id: Some(ObjectId::new()),
            title: "Butter Chicken".to_string(),
            description: None,
            price: 12.99,
            image: None,
            restaurant_id: Some("plain-string-ref".to_string()),
            tags: vec!["spicy".to_string()],
            created_at: now,
            updated_at: now,
        };

        let out = ProductOut::from(product);
        assert_eq!(out.restaurant_id.as_deref(), Some("plain-string-ref"));
        assert_eq!(out.tags, vec!["spicy"]);
    }

    #[test]
    fn tags_default_to_empty() {
        let doc = mongodb::bson::doc! {
            "title": "Plain Rice",
            "price": 3.5,
            "created_at": DateTime::now(),
            "updated_at": DateTime::now(),
        };
        let product: Product = mongodb::bson::from_document(doc).unwrap();
        assert!(product.tags.is_empty());
    }
}
