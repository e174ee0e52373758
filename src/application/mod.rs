pub mod account_service;
pub mod cart_service;
pub mod catalog_service;
pub mod checkout_service;
pub mod payment_service;

#[cfg(test)]
pub(crate) mod test_support;
