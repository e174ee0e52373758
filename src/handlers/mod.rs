pub mod accounts;
pub mod auth;
pub mod cart;
pub mod orders;
pub mod payment_methods;
pub mod products;
pub mod subscriptions;
