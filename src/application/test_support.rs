//! In-memory fakes for the repository and analytics ports. The fakes are
//! cheaply cloneable handles over shared state, so a test can move one copy
//! into a service and keep another to inspect afterwards. Each fake counts
//! how often it was touched so tests can assert that rejected operations
//! never reached the store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::{Account, Identity};
use crate::domain::cart::{Cart, NewCartItem};
use crate::domain::errors::DomainError;
use crate::domain::order::{OrderPage, OrderStatus, OrderView, PAYMENT_METHOD};
use crate::domain::payment::{PaymentMethod, PaymentMethodDraft};
use crate::domain::ports::{
    AccountRepository, AnalyticsSink, CartRepository, OrderRepository, PaymentMethodRepository,
    SubscriptionRepository,
};
use crate::domain::subscription::Subscription;

pub fn identity() -> Identity {
    Identity {
        account_id: Uuid::new_v4(),
        email: "shopper@example.com".to_string(),
    }
}

#[derive(Clone, Default)]
pub struct RecordingAnalytics {
    events: Arc<Mutex<Vec<(String, serde_json::Value)>>>,
}

impl AnalyticsSink for RecordingAnalytics {
    fn log_event(&self, name: &str, properties: serde_json::Value) {
        self.events
            .lock()
            .expect("analytics lock")
            .push((name.to_string(), properties));
    }
}

impl RecordingAnalytics {
    pub fn events(&self) -> Vec<(String, serde_json::Value)> {
        self.events.lock().expect("analytics lock").clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.events().into_iter().map(|(n, _)| n).collect()
    }
}

#[derive(Clone, Default)]
pub struct InMemoryCartRepo {
    cart: Arc<Mutex<Cart>>,
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl InMemoryCartRepo {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn cart(&self) -> Cart {
        self.cart.lock().expect("cart lock").clone()
    }
}

impl CartRepository for InMemoryCartRepo {
    fn load(&self, _account_id: Uuid) -> Result<Cart, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DomainError::Store("cart load failed".to_string()));
        }
        Ok(self.cart())
    }

    fn upsert_item(&self, _account_id: Uuid, item: &NewCartItem) -> Result<Cart, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DomainError::Store("cart write failed".to_string()));
        }
        let mut cart = self.cart.lock().expect("cart lock");
        cart.merge_one(item, Utc::now());
        Ok(cart.clone())
    }
}

/// Order store over a preloaded cart, mimicking the transactional contract:
/// on success the order exists and the cart is cleared; on any rejection the
/// cart is untouched.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepo {
    cart: Arc<Mutex<Cart>>,
    orders: Arc<Mutex<Vec<OrderView>>>,
    calls: Arc<AtomicUsize>,
    fail: bool,
}

impl InMemoryOrderRepo {
    pub fn with_cart(cart: Cart) -> Self {
        Self {
            cart: Arc::new(Mutex::new(cart)),
            ..Self::default()
        }
    }

    pub fn failing_with_cart(cart: Cart) -> Self {
        Self {
            cart: Arc::new(Mutex::new(cart)),
            fail: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn cart(&self) -> Cart {
        self.cart.lock().expect("cart lock").clone()
    }

    pub fn orders(&self) -> Vec<OrderView> {
        self.orders.lock().expect("orders lock").clone()
    }
}

impl OrderRepository for InMemoryOrderRepo {
    fn create_from_cart(
        &self,
        account_id: Uuid,
        contact_email: &str,
        expected_total: &BigDecimal,
    ) -> Result<OrderView, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(DomainError::Store("order create failed".to_string()));
        }
        let mut cart = self.cart.lock().expect("cart lock");
        if cart.items.is_empty() {
            return Err(DomainError::Validation("cart is empty".to_string()));
        }
        if cart.total_amount() != *expected_total {
            return Err(DomainError::Validation("order total mismatch".to_string()));
        }
        let order = OrderView {
            id: Uuid::new_v4(),
            account_id,
            contact_email: contact_email.to_string(),
            items: std::mem::take(&mut cart.items),
            total_amount: expected_total.clone(),
            status: OrderStatus::Pending,
            payment_method: PAYMENT_METHOD.to_string(),
            created_at: Utc::now(),
        };
        self.orders
            .lock()
            .expect("orders lock")
            .push(order.clone());
        Ok(order)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.orders().into_iter().find(|o| o.id == id))
    }

    fn list_for_account(
        &self,
        account_id: Uuid,
        _page: i64,
        _limit: i64,
    ) -> Result<OrderPage, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let items: Vec<OrderView> = self
            .orders()
            .into_iter()
            .filter(|o| o.account_id == account_id)
            .collect();
        let total = items.len() as i64;
        Ok(OrderPage { items, total })
    }
}

#[derive(Clone, Default)]
pub struct InMemoryPaymentRepo {
    methods: Arc<Mutex<Vec<PaymentMethod>>>,
    calls: Arc<AtomicUsize>,
}

impl InMemoryPaymentRepo {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn methods(&self) -> Vec<PaymentMethod> {
        self.methods.lock().expect("methods lock").clone()
    }
}

impl PaymentMethodRepository for InMemoryPaymentRepo {
    fn insert(
        &self,
        _account_id: Uuid,
        draft: &PaymentMethodDraft,
    ) -> Result<PaymentMethod, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let method = PaymentMethod {
            id: Uuid::new_v4(),
            cardholder_name: draft.cardholder_name.clone(),
            card_last4: draft.card_last4.clone(),
            card_brand: draft.card_brand,
            expiry_month: draft.expiry_month,
            expiry_year: draft.expiry_year,
            is_default: draft.is_default,
            created_at: Utc::now(),
        };
        self.methods
            .lock()
            .expect("methods lock")
            .push(method.clone());
        Ok(method)
    }

    fn list_for_account(&self, _account_id: Uuid) -> Result<Vec<PaymentMethod>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.methods())
    }

    fn delete(&self, _account_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut methods = self.methods.lock().expect("methods lock");
        let before = methods.len();
        methods.retain(|m| m.id != id);
        if methods.len() == before {
            return Err(DomainError::NotFound);
        }
        Ok(())
    }

    fn set_default(&self, _account_id: Uuid, id: Uuid) -> Result<(), DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut methods = self.methods.lock().expect("methods lock");
        if !methods.iter().any(|m| m.id == id) {
            return Err(DomainError::NotFound);
        }
        for m in methods.iter_mut() {
            m.is_default = m.id == id;
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryAccountRepo {
    accounts: Arc<Mutex<Vec<Account>>>,
    calls: Arc<AtomicUsize>,
}

impl InMemoryAccountRepo {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.lock().expect("accounts lock").clone()
    }
}

impl AccountRepository for InMemoryAccountRepo {
    fn upsert_profile(
        &self,
        identity: &Identity,
        display_name: &str,
    ) -> Result<Account, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let mut accounts = self.accounts.lock().expect("accounts lock");
        if let Some(existing) = accounts.iter_mut().find(|a| a.id == identity.account_id) {
            existing.email = identity.email.clone();
            existing.display_name = display_name.to_string();
            existing.updated_at = Utc::now();
            return Ok(existing.clone());
        }
        let account = Account {
            id: identity.account_id,
            email: identity.email.clone(),
            display_name: display_name.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        accounts.push(account.clone());
        Ok(account)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.accounts().into_iter().find(|a| a.id == id))
    }
}

#[derive(Clone, Default)]
pub struct InMemorySubscriptionRepo {
    subscriptions: Arc<Mutex<Vec<Subscription>>>,
    calls: Arc<AtomicUsize>,
}

impl InMemorySubscriptionRepo {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn subscriptions(&self) -> Vec<Subscription> {
        self.subscriptions.lock().expect("subscriptions lock").clone()
    }
}

impl SubscriptionRepository for InMemorySubscriptionRepo {
    fn insert(&self, email: &str) -> Result<Subscription, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let subscription = Subscription {
            id: Uuid::new_v4(),
            email: email.to_string(),
            active: true,
            subscribed_at: Utc::now(),
        };
        self.subscriptions
            .lock()
            .expect("subscriptions lock")
            .push(subscription.clone());
        Ok(subscription)
    }
}
