pub mod auth;
pub mod health;
pub mod quick_quote;
pub mod quote;
pub mod resource;
pub mod tier;
