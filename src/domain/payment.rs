use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
    Discover,
    Unknown,
}

impl CardBrand {
    /// Classify a card number by its issuer prefix.
    pub fn detect(card_number: &str) -> CardBrand {
        let digits: String = card_number.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.starts_with('4') {
            CardBrand::Visa
        } else if matches!(digits.get(..2), Some("51" | "52" | "53" | "54" | "55")) {
            CardBrand::Mastercard
        } else if matches!(digits.get(..2), Some("34" | "37")) {
            CardBrand::Amex
        } else if digits.starts_with("6011") || digits.starts_with("65") {
            CardBrand::Discover
        } else {
            CardBrand::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CardBrand::Visa => "visa",
            CardBrand::Mastercard => "mastercard",
            CardBrand::Amex => "amex",
            CardBrand::Discover => "discover",
            CardBrand::Unknown => "unknown",
        }
    }

    pub fn parse(s: &str) -> CardBrand {
        match s {
            "visa" => CardBrand::Visa,
            "mastercard" => CardBrand::Mastercard,
            "amex" => CardBrand::Amex,
            "discover" => CardBrand::Discover,
            _ => CardBrand::Unknown,
        }
    }
}

/// Stored payment method. Only the last four digits of the card number are
/// ever retained.
#[derive(Debug, Clone)]
pub struct PaymentMethod {
    pub id: Uuid,
    pub cardholder_name: String,
    pub card_last4: String,
    pub card_brand: CardBrand,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

/// Card details as submitted by the caller; carries the full number, which
/// must be reduced to last4 + brand before anything is persisted.
#[derive(Debug, Clone)]
pub struct NewPaymentMethod {
    pub cardholder_name: String,
    pub card_number: String,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub is_default: bool,
}

/// What actually crosses the repository boundary: the sanitised record.
#[derive(Debug, Clone)]
pub struct PaymentMethodDraft {
    pub cardholder_name: String,
    pub card_last4: String,
    pub card_brand: CardBrand,
    pub expiry_month: i32,
    pub expiry_year: i32,
    pub is_default: bool,
}
