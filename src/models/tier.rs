use serde::{Deserialize, Serialize};

use super::participants::{IdentityCosts, IdentityProfits, ParticipantCounts, SellingPrices};

/// A saved what-if scenario for a different total participant count.
///
/// Built from a snapshot of the base quote; once created only its selling
/// prices (and the profits derived from them) change. Deleting a tier never
/// touches the base quote or its sibling tiers.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TierPricing {
    pub id: String,
    /// The requested target total. The scaled counts below may drift off it
    /// by a head or two because each field rounds independently.
    pub participant_count: u32,
    pub participant_counts: ParticipantCounts,
    pub identity_costs: IdentityCosts,
    pub selling_prices: SellingPrices,
    pub identity_profits: IdentityProfits,
}

/// Body of `POST /api/quotes/{id}/tiers`.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AddTierInput {
    pub participant_count: u32,
}
