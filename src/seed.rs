//! One-time startup population of demonstration data.

use std::collections::HashMap;

use anyhow::Result;
use futures::TryStreamExt;
use mongodb::bson::{oid::ObjectId, DateTime};
use mongodb::{Collection, Database};

use crate::db::{PRODUCT_COLLECTION, RESTAURANT_COLLECTION};
use crate::models::{Product, Restaurant};

/// Seeds the `restaurant` and `product` collections when they are empty.
///
/// Products reference their owning restaurant by the store-assigned id, so
/// restaurants are read back after insertion to build a name → id map. The
/// two emptiness checks are independent and not atomic; two processes
/// cold-starting against the same empty store can double-seed.
pub async fn seed_demo_data(db: &Database) -> Result<()> {
    let restaurants: Collection<Restaurant> = db.collection(RESTAURANT_COLLECTION);
    let now = DateTime::now();

    if restaurants.count_documents(None, None).await? == 0 {
        restaurants.insert_many(demo_restaurants(now), None).await?;
        tracing::info!("seeded demo restaurants");
    }

    let products: Collection<Product> = db.collection(PRODUCT_COLLECTION);
    if products.count_documents(None, None).await? == 0 {
        let mut ids = HashMap::new();
        let mut cursor = restaurants.find(None, None).await?;
        while let Some(restaurant) = cursor.try_next().await? {
            if let Some(id) = restaurant.id {
                ids.insert(restaurant.name, id);
            }
        }

        products.insert_many(demo_products(now, &ids), None).await?;
        tracing::info!("seeded demo products");
    }

    Ok(())
}

fn demo_restaurants(now: DateTime) -> Vec<Restaurant> {
    vec![
        Restaurant {
            id: None,
            name: "Spice Garden".to_string(),
            description: Some("Authentic Indian cuisine with a modern twist".to_string()),
            address: Some("123 Curry Ave".to_string()),
            image: Some(
                "https://images.unsplash.com/photo-1544025162-d76694265947?q=80&w=1600&auto=format&fit=crop"
                    .to_string(),
            ),
            rating: 4.6,
            cuisine: Some("Indian".to_string()),
            created_at: now,
            updated_at: now,
        },
        Restaurant {
            id: None,
            name: "Pasta Piazza".to_string(),
            description: Some("Fresh handmade pastas and rustic sauces".to_string()),
            address: Some("45 Roma Street".to_string()),
            image: Some(
                "https://images.unsplash.com/photo-1523986371872-9d3ba2e2f642?q=80&w=1600&auto=format&fit=crop"
                    .to_string(),
            ),
            rating: 4.7,
            cuisine: Some("Italian".to_string()),
            created_at: now,
            updated_at: now,
        },
    ]
}

fn demo_products(now: DateTime, restaurant_ids: &HashMap<String, ObjectId>) -> Vec<Product> {
    // A restaurant missing from the map leaves the reference unset rather
    // than aborting the seed.
    let owner = |name: &str| restaurant_ids.get(name).map(|id| id.to_hex());

    vec![
        Product {
            id: None,
            title: "Butter Chicken".to_string(),
            description: Some("Creamy tomato sauce with tender chicken".to_string()),
            price: 12.99,
            image: Some(
                "https://images.unsplash.com/photo-1604909052743-88e0b01e6e8b?q=80&w=1600&auto=format&fit=crop"
                    .to_string(),
            ),
            restaurant_id: owner("Spice Garden"),
            tags: vec!["spicy".to_string(), "non-veg".to_string()],
            created_at: now,
            updated_at: now,
        },
        Product {
            id: None,
            title: "Paneer Tikka".to_string(),
            description: Some("Grilled cottage cheese with spices".to_string()),
            price: 9.5,
            image: Some(
                "https://images.unsplash.com/photo-1625944528146-1b02d4ca9d24?q=80&w=1600&auto=format&fit=crop"
                    .to_string(),
            ),
            restaurant_id: owner("Spice Garden"),
            tags: vec!["veg".to_string(), "grill".to_string()],
            created_at: now,
            updated_at: now,
        },
        Product {
            id: None,
            title: "Penne Arrabbiata".to_string(),
            description: Some("Spicy tomato sauce with garlic and chili".to_string()),
            price: 10.99,
            image: Some(
                "https://images.unsplash.com/photo-1473093295043-cdd812d0e601?q=80&w=1600&auto=format&fit=crop"
                    .to_string(),
            ),
            restaurant_id: owner("Pasta Piazza"),
            tags: vec!["veg".to_string(), "pasta".to_string()],
            created_at: now,
            updated_at: now,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_demo_restaurants() {
        let restaurants = demo_restaurants(DateTime::now());
        let names: Vec<&str> = restaurants.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Spice Garden", "Pasta Piazza"]);
    }

    #[test]
    fn products_reference_owners_by_id() {
        let mut ids = HashMap::new();
        ids.insert("Spice Garden".to_string(), ObjectId::new());
        ids.insert("Pasta Piazza".to_string(), ObjectId::new());

        let products = demo_products(DateTime::now(), &ids);
        assert_eq!(products.len(), 3);

        let spice_garden = ids["Spice Garden"].to_hex();
        let pasta_piazza = ids["Pasta Piazza"].to_hex();
        let refs: Vec<&str> = products
            .iter()
            .filter_map(|p| p.restaurant_id.as_deref())
            .collect();
        assert_eq!(
            refs,
            [
                spice_garden.as_str(),
                spice_garden.as_str(),
                pasta_piazza.as_str()
            ]
        );
    }

    #[test]
    fn missing_owner_leaves_reference_unset() {
        let products = demo_products(DateTime::now(), &HashMap::new());
        assert!(products.iter().all(|p| p.restaurant_id.is_none()));
    }

    #[test]
    fn demo_data_is_in_range() {
        for restaurant in demo_restaurants(DateTime::now()) {
            assert!((0.0..=5.0).contains(&restaurant.rating));
        }
        for product in demo_products(DateTime::now(), &HashMap::new()) {
            assert!(product.price >= 0.0);
        }
    }
}
