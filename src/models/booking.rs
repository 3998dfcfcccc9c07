use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub age: i64,
    pub email: String,
    pub sessions: i64,
    pub payment_method: PaymentMethod,
    pub total_amount: f64,
    pub premium_plan: Option<PremiumPlan>,
    pub status: BookingStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Pending => "pending",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    // Lenient: unknown stored values count as pending
    pub fn parse(s: &str) -> Self {
        match s {
            "confirmed" => BookingStatus::Confirmed,
            "cancelled" => BookingStatus::Cancelled,
            _ => BookingStatus::Pending,
        }
    }

    pub fn try_parse(s: &str) -> Option<Self> {
        match s {
            "confirmed" => Some(BookingStatus::Confirmed),
            "pending" => Some(BookingStatus::Pending),
            "cancelled" => Some(BookingStatus::Cancelled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Card,
    Bank,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Bank => "bank",
        }
    }

    // Lenient: unknown stored values count as card
    pub fn parse(s: &str) -> Self {
        match s {
            "bank" => PaymentMethod::Bank,
            _ => PaymentMethod::Card,
        }
    }

    pub fn try_parse(s: &str) -> Option<Self> {
        match s {
            "card" => Some(PaymentMethod::Card),
            "bank" => Some(PaymentMethod::Bank),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Card",
            PaymentMethod::Bank => "Bank",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum PremiumPlan {
    Gold,
    Platinum,
}

impl PremiumPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            PremiumPlan::Gold => "gold",
            PremiumPlan::Platinum => "platinum",
        }
    }

    pub fn try_parse(s: &str) -> Option<Self> {
        match s {
            "gold" => Some(PremiumPlan::Gold),
            "platinum" => Some(PremiumPlan::Platinum),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PremiumPlan::Gold => "Gold",
            PremiumPlan::Platinum => "Platinum",
        }
    }
}
