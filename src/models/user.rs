use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

/// A phone-identified account in the `user` collection.
///
/// Created on the first OTP request for a phone number; `is_verified` is
/// reset to false by every subsequent OTP request and set true on a
/// successful verification. `last_login` is an RFC 3339 string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub phone: String,
    pub name: Option<String>,
    #[serde(default)]
    pub is_verified: bool,
    pub last_login: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}
