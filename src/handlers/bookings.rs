use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::Booking;
use crate::services::booking::{self, NewBooking};
use crate::state::AppState;

fn check_auth(headers: &HeaderMap, expected_token: &str) -> Result<(), AppError> {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let token = auth.strip_prefix("Bearer ").unwrap_or("");
    if token != expected_token {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    id: String,
    user_id: String,
    name: String,
    age: i64,
    email: String,
    sessions: i64,
    payment_method: String,
    total_amount: f64,
    premium_plan: Option<String>,
    status: String,
    created_at: String,
    updated_at: String,
}

impl From<Booking> for BookingResponse {
    fn from(b: Booking) -> Self {
        BookingResponse {
            id: b.id,
            user_id: b.user_id,
            name: b.name,
            age: b.age,
            email: b.email,
            sessions: b.sessions,
            payment_method: b.payment_method.as_str().to_string(),
            premium_plan: b.premium_plan.map(|p| p.as_str().to_string()),
            total_amount: b.total_amount,
            status: b.status.as_str().to_string(),
            created_at: b.created_at.and_utc().to_rfc3339_opts(SecondsFormat::Secs, true),
            updated_at: b.updated_at.and_utc().to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

// POST /api/bookings
pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewBooking>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError> {
    let booking = {
        let db = state.db.lock().unwrap();
        booking::create(&db, body)?
    };

    Ok((StatusCode::CREATED, Json(booking.into())))
}

// GET /api/bookings
pub async fn get_bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let bookings = {
        let db = state.db.lock().unwrap();
        booking::list_all(&db)?
    };

    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

// GET /api/bookings/user/:user_id
pub async fn get_user_bookings(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<Vec<BookingResponse>>, AppError> {
    let bookings = {
        let db = state.db.lock().unwrap();
        booking::list_for_user(&db, &user_id)?
    };

    Ok(Json(bookings.into_iter().map(Into::into).collect()))
}

// PUT /api/bookings/:id/status
#[derive(Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

pub async fn update_booking_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateStatusRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    check_auth(&headers, &state.config.admin_token)?;

    let status = body
        .status
        .ok_or_else(|| AppError::Validation("status is required".to_string()))?;

    let booking = {
        let db = state.db.lock().unwrap();
        booking::update_status(&db, &id, &status)?
    };

    Ok(Json(booking.into()))
}
