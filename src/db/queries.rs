use chrono::{NaiveDateTime, Utc};
use rusqlite::{params, Connection};

use crate::models::{
    AdminNotification, Booking, BookingStatus, PaymentMethod, PremiumPlan,
};

// ── Bookings ──

pub fn create_booking(conn: &Connection, booking: &Booking) -> anyhow::Result<()> {
    let created_at = booking.created_at.format("%Y-%m-%d %H:%M:%S").to_string();
    let updated_at = booking.updated_at.format("%Y-%m-%d %H:%M:%S").to_string();

    conn.execute(
        "INSERT INTO bookings (id, user_id, name, age, email, sessions, payment_method, total_amount, premium_plan, status, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            booking.id,
            booking.user_id,
            booking.name,
            booking.age,
            booking.email,
            booking.sessions,
            booking.payment_method.as_str(),
            booking.total_amount,
            booking.premium_plan.as_ref().map(|p| p.as_str()),
            booking.status.as_str(),
            created_at,
            updated_at,
        ],
    )?;
    Ok(())
}

pub fn get_all_bookings(conn: &Connection) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, age, email, sessions, payment_method, total_amount, premium_plan, status, created_at, updated_at
         FROM bookings ORDER BY created_at DESC, rowid DESC",
    )?;

    let rows = stmt.query_map([], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn get_bookings_for_user(conn: &Connection, user_id: &str) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, name, age, email, sessions, payment_method, total_amount, premium_plan, status, created_at, updated_at
         FROM bookings WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
    )?;

    let rows = stmt.query_map(params![user_id], |row| Ok(parse_booking_row(row)))?;

    let mut bookings = vec![];
    for row in rows {
        bookings.push(row??);
    }
    Ok(bookings)
}

pub fn get_booking_by_id(conn: &Connection, id: &str) -> anyhow::Result<Option<Booking>> {
    let result = conn.query_row(
        "SELECT id, user_id, name, age, email, sessions, payment_method, total_amount, premium_plan, status, created_at, updated_at
         FROM bookings WHERE id = ?1",
        params![id],
        |row| Ok(parse_booking_row(row)),
    );

    match result {
        Ok(booking) => Ok(Some(booking?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn update_booking_status(
    conn: &Connection,
    id: &str,
    status: &BookingStatus,
) -> anyhow::Result<bool> {
    let now = Utc::now()
        .naive_utc()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    let count = conn.execute(
        "UPDATE bookings SET status = ?1, updated_at = ?2 WHERE id = ?3",
        params![status.as_str(), now, id],
    )?;
    Ok(count > 0)
}

// Single normalization point for rows written by older imports, where any
// column except the id may be NULL or hold an unknown enum value.
fn parse_booking_row(row: &rusqlite::Row) -> anyhow::Result<Booking> {
    let id: String = row.get(0)?;
    let user_id: Option<String> = row.get(1)?;
    let name: Option<String> = row.get(2)?;
    let age: Option<i64> = row.get(3)?;
    let email: Option<String> = row.get(4)?;
    let sessions: Option<i64> = row.get(5)?;
    let payment_method_str: Option<String> = row.get(6)?;
    let total_amount: Option<f64> = row.get(7)?;
    let premium_plan_str: Option<String> = row.get(8)?;
    let status_str: Option<String> = row.get(9)?;
    let created_at_str: Option<String> = row.get(10)?;
    let updated_at_str: Option<String> = row.get(11)?;

    let created_at = created_at_str
        .and_then(|s| NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S").ok())
        .unwrap_or_else(|| Utc::now().naive_utc());
    let updated_at = updated_at_str
        .and_then(|s| NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S").ok())
        .unwrap_or_else(|| Utc::now().naive_utc());

    Ok(Booking {
        id,
        user_id: user_id.unwrap_or_default(),
        name: name.unwrap_or_default(),
        age: age.unwrap_or(0),
        email: email.unwrap_or_default(),
        sessions: sessions.unwrap_or(0),
        payment_method: PaymentMethod::parse(payment_method_str.as_deref().unwrap_or("")),
        total_amount: total_amount.unwrap_or(0.0),
        premium_plan: premium_plan_str
            .as_deref()
            .and_then(PremiumPlan::try_parse),
        status: BookingStatus::parse(status_str.as_deref().unwrap_or("")),
        created_at,
        updated_at,
    })
}

// ── Admin notifications ──

pub fn create_notification(
    conn: &Connection,
    notification: &AdminNotification,
) -> anyhow::Result<()> {
    let details_json = match &notification.details {
        Some(value) => Some(serde_json::to_string(value)?),
        None => None,
    };
    let created_at = notification
        .created_at
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    conn.execute(
        "INSERT INTO admin_notifications (id, kind, message, details, is_read, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            notification.id,
            notification.kind,
            notification.message,
            details_json,
            notification.is_read as i32,
            created_at,
        ],
    )?;
    Ok(())
}

pub fn get_all_notifications(conn: &Connection) -> anyhow::Result<Vec<AdminNotification>> {
    let mut stmt = conn.prepare(
        "SELECT id, kind, message, details, is_read, created_at
         FROM admin_notifications ORDER BY created_at DESC, rowid DESC",
    )?;

    let rows = stmt.query_map([], |row| Ok(parse_notification_row(row)))?;

    let mut notifications = vec![];
    for row in rows {
        notifications.push(row??);
    }
    Ok(notifications)
}

pub fn get_notification_by_id(
    conn: &Connection,
    id: &str,
) -> anyhow::Result<Option<AdminNotification>> {
    let result = conn.query_row(
        "SELECT id, kind, message, details, is_read, created_at
         FROM admin_notifications WHERE id = ?1",
        params![id],
        |row| Ok(parse_notification_row(row)),
    );

    match result {
        Ok(notification) => Ok(Some(notification?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn mark_notification_read(conn: &Connection, id: &str) -> anyhow::Result<bool> {
    let count = conn.execute(
        "UPDATE admin_notifications SET is_read = 1 WHERE id = ?1",
        params![id],
    )?;
    Ok(count > 0)
}

fn parse_notification_row(row: &rusqlite::Row) -> anyhow::Result<AdminNotification> {
    let id: String = row.get(0)?;
    let kind: String = row.get(1)?;
    let message: String = row.get(2)?;
    let details_json: Option<String> = row.get(3)?;
    let is_read = row.get::<_, i32>(4)? != 0;
    let created_at_str: String = row.get(5)?;

    let created_at = NaiveDateTime::parse_from_str(&created_at_str, "%Y-%m-%d %H:%M:%S")
        .unwrap_or_else(|_| Utc::now().naive_utc());

    Ok(AdminNotification {
        id,
        kind,
        message,
        details: details_json.and_then(|s| serde_json::from_str(&s).ok()),
        is_read,
        created_at,
    })
}
