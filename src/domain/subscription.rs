use chrono::{DateTime, Utc};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Subscription {
    pub id: Uuid,
    pub email: String,
    pub active: bool,
    pub subscribed_at: DateTime<Utc>,
}

/// Minimal shape check for a subscription address: exactly one `@`, a
/// non-empty local part, and a dotted domain. Deliverability is the mail
/// provider's problem.
pub fn email_is_well_formed(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::email_is_well_formed;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(email_is_well_formed("shopper@example.com"));
        assert!(email_is_well_formed("first.last@mail.example.co.uk"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!email_is_well_formed(""));
        assert!(!email_is_well_formed("no-at-sign"));
        assert!(!email_is_well_formed("@example.com"));
        assert!(!email_is_well_formed("user@"));
        assert!(!email_is_well_formed("user@nodot"));
        assert!(!email_is_well_formed("user@.com"));
        assert!(!email_is_well_formed("user@example.com."));
        assert!(!email_is_well_formed("two@@example.com"));
        assert!(!email_is_well_formed("spaced out@example.com"));
    }
}
