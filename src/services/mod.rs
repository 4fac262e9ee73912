pub mod category_service;
pub mod itinerary_import_service;
pub mod pricing_service;
pub mod quote_service;
pub mod resource_service;
pub mod tier_service;
