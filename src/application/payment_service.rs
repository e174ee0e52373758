use uuid::Uuid;

use crate::domain::account::Identity;
use crate::domain::errors::DomainError;
use crate::domain::payment::{CardBrand, NewPaymentMethod, PaymentMethod, PaymentMethodDraft};
use crate::domain::ports::PaymentMethodRepository;

/// Card bookkeeping for an account. The full card number never crosses the
/// repository boundary; it is reduced to the last four digits plus the
/// detected brand here.
pub struct PaymentService<R> {
    methods: R,
}

impl<R: PaymentMethodRepository> PaymentService<R> {
    pub fn new(methods: R) -> Self {
        Self { methods }
    }

    pub fn add_payment_method(
        &self,
        identity: Option<&Identity>,
        new: NewPaymentMethod,
    ) -> Result<PaymentMethod, DomainError> {
        let identity = identity.ok_or(DomainError::Unauthenticated)?;

        let digits: String = new
            .card_number
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-')
            .collect();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::Validation(
                "card number must contain only digits".to_string(),
            ));
        }
        if !(12..=19).contains(&digits.len()) {
            return Err(DomainError::Validation(
                "card number length is invalid".to_string(),
            ));
        }
        if !(1..=12).contains(&new.expiry_month) {
            return Err(DomainError::Validation(
                "expiry month must be between 1 and 12".to_string(),
            ));
        }

        let draft = PaymentMethodDraft {
            cardholder_name: new.cardholder_name,
            card_last4: digits[digits.len() - 4..].to_string(),
            card_brand: CardBrand::detect(&digits),
            expiry_month: new.expiry_month,
            expiry_year: new.expiry_year,
            is_default: new.is_default,
        };
        self.methods.insert(identity.account_id, &draft)
    }

    pub fn payment_methods(
        &self,
        identity: Option<&Identity>,
    ) -> Result<Vec<PaymentMethod>, DomainError> {
        let identity = identity.ok_or(DomainError::Unauthenticated)?;
        self.methods.list_for_account(identity.account_id)
    }

    pub fn delete_payment_method(
        &self,
        identity: Option<&Identity>,
        id: Uuid,
    ) -> Result<(), DomainError> {
        let identity = identity.ok_or(DomainError::Unauthenticated)?;
        self.methods.delete(identity.account_id, id)
    }

    pub fn set_default_payment_method(
        &self,
        identity: Option<&Identity>,
        id: Uuid,
    ) -> Result<(), DomainError> {
        let identity = identity.ok_or(DomainError::Unauthenticated)?;
        self.methods.set_default(identity.account_id, id)
    }
}
