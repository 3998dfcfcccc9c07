pub mod bookings;
pub mod health;
pub mod notifications;
pub mod receipts;
