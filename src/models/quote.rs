use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::cost::CostCategory;
use super::participants::{ParticipantCounts, SellingPrices};
use super::tier::TierPricing;

/// A group quote as stored in the `GroupQuotes` collection. The category set
/// is seeded from the fixed template at creation and only its items change
/// afterwards.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GroupQuote {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub quote_number: String,
    pub group_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_days: u32,
    #[serde(default)]
    pub participants: ParticipantCounts,
    #[serde(default)]
    pub selling_prices: SellingPrices,
    pub categories: Vec<CostCategory>,
    /// Highest populated accommodation day; kept contiguous by the category
    /// engine when rows are removed.
    #[serde(default)]
    pub accommodation_days: u32,
    #[serde(default)]
    pub tiers: Vec<TierPricing>,
    #[serde(default)]
    pub note: String,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Header fields a client may supply when creating a quote; everything else
/// is seeded server-side.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CreateQuoteInput {
    pub group_name: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub departure_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_days: u32,
    #[serde(default)]
    pub participants: Option<ParticipantCounts>,
    #[serde(default)]
    pub selling_prices: Option<SellingPrices>,
    #[serde(default)]
    pub note: Option<String>,
}

/// Header-only update payload for `PUT /api/quotes/{id}`. Items, counts and
/// prices go through the edit endpoint so totals stay derived.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UpdateQuoteInput {
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub departure_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_days: Option<u32>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// List-view projection returned by `GET /api/quotes`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QuoteSummary {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub quote_number: String,
    pub group_name: String,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub departure_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_days: u32,
    pub group_size: u32,
    /// Whole travelling party, infants included.
    pub total_participants: u32,
    pub status: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl GroupQuote {
    pub fn summary(&self) -> QuoteSummary {
        QuoteSummary {
            id: self.id,
            quote_number: self.quote_number.clone(),
            group_name: self.group_name.clone(),
            customer_name: self.customer_name.clone(),
            departure_date: self.departure_date,
            total_days: self.total_days,
            group_size: self.participants.group_size(),
            total_participants: self.participants.total_with_infants(),
            status: self.status.clone(),
            updated_at: self.updated_at,
        }
    }
}
