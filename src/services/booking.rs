use chrono::Utc;
use rusqlite::Connection;
use serde::Deserialize;
use uuid::Uuid;

use crate::db::queries;
use crate::errors::AppError;
use crate::models::{Booking, BookingStatus, PaymentMethod, PremiumPlan};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub age: Option<i64>,
    pub email: Option<String>,
    pub sessions: Option<i64>,
    pub payment_method: Option<String>,
    pub total_amount: Option<f64>,
    pub premium_plan: Option<String>,
}

pub fn create(conn: &Connection, input: NewBooking) -> Result<Booking, AppError> {
    let user_id = input.user_id.as_deref().unwrap_or("").trim().to_string();
    if user_id.is_empty() {
        return Err(AppError::Validation("userId is required".to_string()));
    }

    let name = input.name.as_deref().unwrap_or("").trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    let age = input
        .age
        .ok_or_else(|| AppError::Validation("age is required".to_string()))?;

    let email = input.email.as_deref().unwrap_or("").trim().to_string();
    if email.is_empty() {
        return Err(AppError::Validation("email is required".to_string()));
    }

    let sessions = input
        .sessions
        .ok_or_else(|| AppError::Validation("sessions is required".to_string()))?;
    if sessions < 1 {
        return Err(AppError::Validation(
            "sessions must be at least 1".to_string(),
        ));
    }

    let payment_method = input
        .payment_method
        .as_deref()
        .and_then(PaymentMethod::try_parse)
        .ok_or_else(|| AppError::Validation("paymentMethod must be card or bank".to_string()))?;

    let total_amount = input
        .total_amount
        .ok_or_else(|| AppError::Validation("totalAmount is required".to_string()))?;
    if !total_amount.is_finite() || total_amount < 0.0 {
        return Err(AppError::Validation(
            "totalAmount must be a non-negative number".to_string(),
        ));
    }

    let premium_plan = match input.premium_plan.as_deref() {
        Some(s) => Some(PremiumPlan::try_parse(s).ok_or_else(|| {
            AppError::Validation("premiumPlan must be gold or platinum".to_string())
        })?),
        None => None,
    };

    let now = Utc::now().naive_utc();
    let booking = Booking {
        id: Uuid::new_v4().to_string(),
        user_id,
        name,
        age,
        email,
        sessions,
        payment_method,
        total_amount,
        premium_plan,
        status: BookingStatus::Confirmed,
        created_at: now,
        updated_at: now,
    };

    queries::create_booking(conn, &booking)?;
    Ok(booking)
}

pub fn list_all(conn: &Connection) -> Result<Vec<Booking>, AppError> {
    Ok(queries::get_all_bookings(conn)?)
}

pub fn list_for_user(conn: &Connection, user_id: &str) -> Result<Vec<Booking>, AppError> {
    Ok(queries::get_bookings_for_user(conn, user_id)?)
}

pub fn update_status(conn: &Connection, id: &str, status: &str) -> Result<Booking, AppError> {
    let status = BookingStatus::try_parse(status).ok_or_else(|| {
        AppError::Validation("status must be confirmed, pending, or cancelled".to_string())
    })?;

    let updated = queries::update_booking_status(conn, id, &status)?;
    if !updated {
        return Err(AppError::NotFound("Booking not found".to_string()));
    }

    queries::get_booking_by_id(conn, id)?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    fn setup_db() -> Connection {
        db::init_db(":memory:").unwrap()
    }

    fn valid_input() -> NewBooking {
        NewBooking {
            user_id: Some("user-1".to_string()),
            name: Some("Priya Sharma".to_string()),
            age: Some(29),
            email: Some("priya@example.com".to_string()),
            sessions: Some(5),
            payment_method: Some("card".to_string()),
            total_amount: Some(12500.0),
            premium_plan: Some("gold".to_string()),
        }
    }

    #[test]
    fn test_create_valid_booking() {
        let conn = setup_db();
        let booking = create(&conn, valid_input()).unwrap();

        assert!(!booking.id.is_empty());
        assert_eq!(booking.status, BookingStatus::Confirmed);
        assert_eq!(booking.payment_method, PaymentMethod::Card);
        assert_eq!(booking.premium_plan, Some(PremiumPlan::Gold));

        let stored = queries::get_booking_by_id(&conn, &booking.id)
            .unwrap()
            .unwrap();
        assert_eq!(stored.name, "Priya Sharma");
        assert_eq!(stored.sessions, 5);
    }

    #[test]
    fn test_create_trims_whitespace() {
        let conn = setup_db();
        let mut input = valid_input();
        input.name = Some("  Priya Sharma  ".to_string());
        let booking = create(&conn, input).unwrap();
        assert_eq!(booking.name, "Priya Sharma");
    }

    #[test]
    fn test_create_rejects_missing_name() {
        let conn = setup_db();
        let mut input = valid_input();
        input.name = Some("   ".to_string());
        let err = create(&conn, input).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_create_rejects_zero_sessions() {
        let conn = setup_db();
        let mut input = valid_input();
        input.sessions = Some(0);
        let err = create(&conn, input).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_create_rejects_unknown_payment_method() {
        let conn = setup_db();
        let mut input = valid_input();
        input.payment_method = Some("crypto".to_string());
        let err = create(&conn, input).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_create_rejects_negative_amount() {
        let conn = setup_db();
        let mut input = valid_input();
        input.total_amount = Some(-10.0);
        let err = create(&conn, input).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_create_rejects_unknown_plan() {
        let conn = setup_db();
        let mut input = valid_input();
        input.premium_plan = Some("silver".to_string());
        let err = create(&conn, input).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_create_allows_absent_plan() {
        let conn = setup_db();
        let mut input = valid_input();
        input.premium_plan = None;
        let booking = create(&conn, input).unwrap();
        assert_eq!(booking.premium_plan, None);
    }

    #[test]
    fn test_update_status_transitions() {
        let conn = setup_db();
        let booking = create(&conn, valid_input()).unwrap();
        let stored = queries::get_booking_by_id(&conn, &booking.id)
            .unwrap()
            .unwrap();

        let updated = update_status(&conn, &booking.id, "cancelled").unwrap();
        assert_eq!(updated.status, BookingStatus::Cancelled);
        assert!(updated.updated_at >= stored.updated_at);
    }

    #[test]
    fn test_update_status_unknown_id() {
        let conn = setup_db();
        let err = update_status(&conn, "missing", "cancelled").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_update_status_rejects_unknown_value() {
        let conn = setup_db();
        let booking = create(&conn, valid_input()).unwrap();
        let err = update_status(&conn, &booking.id, "archived").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_list_for_user_filters() {
        let conn = setup_db();
        create(&conn, valid_input()).unwrap();

        let mut other = valid_input();
        other.user_id = Some("user-2".to_string());
        create(&conn, other).unwrap();

        let bookings = list_for_user(&conn, "user-1").unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].user_id, "user-1");
    }
}
