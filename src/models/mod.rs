pub mod cost;
pub mod itinerary;
pub mod participants;
pub mod pricing;
pub mod quick_quote;
pub mod quote;
pub mod tier;
pub mod user;
