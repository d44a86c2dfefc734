use axum::{
    extract::{Json, State},
    routing::post,
    Router,
};
use chrono::Utc;
use mongodb::bson::{doc, DateTime, Document};
use mongodb::Collection;
use serde::{Deserialize, Serialize};

use crate::db::USER_COLLECTION;
use crate::error::ApiError;
use crate::ids::normalize;
use crate::models::User;
use crate::AppState;

// Demo OTP. A real deployment would generate a code here and hand it to an
// SMS provider instead of echoing it back.
const DEMO_OTP: &str = "1234";

#[derive(Deserialize)]
struct SendOtpRequest {
    phone: String,
}

#[derive(Serialize)]
struct SendOtpResponse {
    success: bool,
    otp: String,
    message: String,
}

async fn send_otp(
    State(state): State<AppState>,
    Json(req): Json<SendOtpRequest>,
) -> Result<Json<SendOtpResponse>, ApiError> {
    let db = state.store.require()?;

    let phone = req.phone.trim();
    if phone.is_empty() {
        return Err(ApiError::BadRequest("Phone is required"));
    }

    let users: Collection<User> = db.collection(USER_COLLECTION);
    let now = DateTime::now();
    let last_login = Utc::now().to_rfc3339();

    // Upsert by phone; a repeated request must not create a second user.
    match users.find_one(doc! { "phone": phone }, None).await? {
        Some(_) => {
            users
                .update_one(
                    doc! { "phone": phone },
                    doc! { "$set": {
                        "is_verified": false,
                        "last_login": last_login.as_str(),
                        "updated_at": now,
                    } },
                    None,
                )
                .await?;
        }
        None => {
            let user = User {
                id: None,
                phone: phone.to_string(),
                name: None,
                is_verified: false,
                last_login: Some(last_login),
                created_at: now,
                updated_at: now,
            };
            users.insert_one(user, None).await?;
        }
    }

    Ok(Json(SendOtpResponse {
        success: true,
        otp: DEMO_OTP.to_string(),
        message: "OTP generated. Use 1234 for demo.".to_string(),
    }))
}

#[derive(Deserialize)]
struct VerifyOtpRequest {
    phone: String,
    otp: String,
}

#[derive(Serialize)]
struct VerifyOtpResponse {
    success: bool,
    user: Document,
}

async fn verify_otp(
    State(state): State<AppState>,
    Json(req): Json<VerifyOtpRequest>,
) -> Result<Json<VerifyOtpResponse>, ApiError> {
    let db = state.store.require()?;

    let phone = req.phone.trim();
    if req.otp != DEMO_OTP {
        return Err(ApiError::BadRequest("Invalid OTP"));
    }

    let users: Collection<User> = db.collection(USER_COLLECTION);
    users
        .find_one(doc! { "phone": phone }, None)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    users
        .update_one(
            doc! { "phone": phone },
            doc! { "$set": { "is_verified": true, "updated_at": DateTime::now() } },
            None,
        )
        .await?;

    let user = users
        .find_one(doc! { "phone": phone }, None)
        .await?
        .ok_or(ApiError::NotFound("User not found"))?;

    Ok(Json(VerifyOtpResponse {
        success: true,
        user: normalize(mongodb::bson::to_document(&user)?),
    }))
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/send-otp", post(send_otp))
        .route("/auth/verify", post(verify_otp))
}
