pub mod booking;
pub mod notification;

pub use booking::{Booking, BookingStatus, PaymentMethod, PremiumPlan};
pub use notification::{AdminNotification, Notification};
