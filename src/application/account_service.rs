use serde_json::json;

use crate::domain::account::{Account, Identity};
use crate::domain::errors::DomainError;
use crate::domain::ports::{AccountRepository, AnalyticsSink, SubscriptionRepository};
use crate::domain::subscription::{email_is_well_formed, Subscription};

/// Profile registration plus the newsletter list. Registration creates the
/// row everything else (cart items, orders, payment methods) hangs off; the
/// cart starts empty by construction.
pub struct AccountService<R, S, A> {
    accounts: R,
    subscriptions: S,
    analytics: A,
}

impl<R, S, A> AccountService<R, S, A>
where
    R: AccountRepository,
    S: SubscriptionRepository,
    A: AnalyticsSink,
{
    pub fn new(accounts: R, subscriptions: S, analytics: A) -> Self {
        Self {
            accounts,
            subscriptions,
            analytics,
        }
    }

    /// Idempotent on the identity: registering again refreshes the profile
    /// fields instead of failing.
    pub fn register(
        &self,
        identity: Option<&Identity>,
        display_name: &str,
    ) -> Result<Account, DomainError> {
        let identity = identity.ok_or(DomainError::Unauthenticated)?;
        if display_name.trim().is_empty() {
            return Err(DomainError::Validation(
                "display name must not be empty".to_string(),
            ));
        }
        self.accounts.upsert_profile(identity, display_name)
    }

    pub fn account(&self, identity: Option<&Identity>) -> Result<Account, DomainError> {
        let identity = identity.ok_or(DomainError::Unauthenticated)?;
        self.accounts
            .find_by_id(identity.account_id)?
            .ok_or(DomainError::NotFound)
    }

    /// Newsletter signup. Open to signed-out visitors; only the address
    /// shape is validated.
    pub fn subscribe(&self, email: &str) -> Result<Subscription, DomainError> {
        if !email_is_well_formed(email) {
            return Err(DomainError::Validation(
                "e-mail address is malformed".to_string(),
            ));
        }
        let subscription = self.subscriptions.insert(email)?;
        self.analytics
            .log_event("newsletter_signup", json!({ "email": email }));
        Ok(subscription)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{
        identity, InMemoryAccountRepo, InMemorySubscriptionRepo, RecordingAnalytics,
    };

    fn service() -> (
        AccountService<InMemoryAccountRepo, InMemorySubscriptionRepo, RecordingAnalytics>,
        InMemoryAccountRepo,
        InMemorySubscriptionRepo,
        RecordingAnalytics,
    ) {
        let accounts = InMemoryAccountRepo::default();
        let subscriptions = InMemorySubscriptionRepo::default();
        let analytics = RecordingAnalytics::default();
        (
            AccountService::new(accounts.clone(), subscriptions.clone(), analytics.clone()),
            accounts,
            subscriptions,
            analytics,
        )
    }

    #[test]
    fn unauthenticated_registration_makes_no_store_calls() {
        let (service, accounts, _, _) = service();

        assert!(matches!(
            service.register(None, "Shopper"),
            Err(DomainError::Unauthenticated)
        ));
        assert_eq!(accounts.call_count(), 0);
    }

    #[test]
    fn registering_twice_refreshes_the_profile() {
        let (service, accounts, _, _) = service();
        let id = identity();

        service.register(Some(&id), "Shopper").expect("register");
        let updated = service.register(Some(&id), "Renamed").expect("register");

        assert_eq!(updated.display_name, "Renamed");
        assert_eq!(accounts.accounts().len(), 1);
    }

    #[test]
    fn profile_read_before_registration_is_not_found() {
        let (service, _, _, _) = service();
        let id = identity();

        assert!(matches!(
            service.account(Some(&id)),
            Err(DomainError::NotFound)
        ));
    }

    #[test]
    fn malformed_subscription_email_never_reaches_the_store() {
        let (service, _, subscriptions, analytics) = service();

        assert!(matches!(
            service.subscribe("not-an-address"),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(subscriptions.call_count(), 0);
        assert!(analytics.names().is_empty());
    }

    #[test]
    fn subscription_is_stored_active_and_emits_one_event() {
        let (service, _, subscriptions, analytics) = service();

        let subscription = service
            .subscribe("shopper@example.com")
            .expect("subscribe");

        assert!(subscription.active);
        assert_eq!(subscriptions.subscriptions().len(), 1);
        assert_eq!(analytics.names(), vec!["newsletter_signup".to_string()]);
    }
}
