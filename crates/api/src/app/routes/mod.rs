pub mod auth;
pub mod customers;
pub mod invoices;
pub mod notifications;
pub mod platform;
pub mod sellers;
pub mod stats;
pub mod system;
pub mod transactions;
