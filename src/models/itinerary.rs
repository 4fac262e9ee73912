use serde::{Deserialize, Serialize};

/// Day-tagged record handed over by the itinerary module. Meal fields carry
/// the restaurant name as planned on the itinerary; a value marked 自理 means
/// the customer eats on their own and the seeded meal row costs nothing.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ItineraryDay {
    pub day: u32,
    #[serde(default)]
    pub breakfast: Option<String>,
    #[serde(default)]
    pub lunch: Option<String>,
    #[serde(default)]
    pub dinner: Option<String>,
    #[serde(default)]
    pub hotel: Option<String>,
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub activities: Vec<String>,
}

/// Body of `POST /api/quotes/{id}/itinerary-import`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ImportItinerary {
    pub days: Vec<ItineraryDay>,
}
