use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// A record in the `restaurant` collection. Written only by the startup
/// seed; the API never mutates restaurants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    /// 0–5 scale.
    #[serde(default = "default_rating")]
    pub rating: f64,
    pub cuisine: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

fn default_rating() -> f64 {
    4.5
}

/// Response shape for restaurant endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantOut {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub address: Option<String>,
    pub image: Option<String>,
    pub rating: f64,
    pub cuisine: Option<String>,
}

impl From<Restaurant> for RestaurantOut {
    fn from(restaurant: Restaurant) -> Self {
        Self {
            id: restaurant.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            name: restaurant.name,
            description: restaurant.description,
            address: restaurant.address,
            image: restaurant.image,
            rating: restaurant.rating,
            cuisine: restaurant.cuisine,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_stringifies_object_id() {
        let oid = ObjectId::new();
        let now = DateTime::now();
        let restaurant = Restaurant {
            id: Some(oid),
            name: "Spice Garden".to_string(),
            description: None,
            address: None,
            image: None,
            rating: 4.6,
            cuisine: Some("Indian".to_string()),
            created_at: now,
            updated_at: now,
        };

        let out = RestaurantOut::from(restaurant);
        assert_eq!(out.id, oid.to_hex());
        assert_eq!(out.name, "Spice Garden");
    }

    #[test]
    fn rating_defaults_when_absent() {
        let doc = mongodb::bson::doc! {
            "name": "No Rating Diner",
            "created_at": DateTime::now(),
            "updated_at": DateTime::now(),
        };
        let restaurant: Restaurant = mongodb::bson::from_document(doc).unwrap();
        assert_eq!(restaurant.rating, 4.5);
    }
}
