pub mod product;
pub mod restaurant;
pub mod user;

pub use product::{Product, ProductOut};
pub use restaurant::{Restaurant, RestaurantOut};
pub use user::User;
