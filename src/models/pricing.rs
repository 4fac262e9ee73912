use serde::{Deserialize, Serialize};

use super::cost::CategoryId;
use super::participants::{IdentityCosts, IdentityProfits};

/// One row of the accommodation breakdown: the Nth room listed each day,
/// aggregated across all days it appears on.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AccommodationSummaryItem {
    /// First non-empty room name found at this position.
    pub name: String,
    /// Sum of this position's item totals across days.
    pub total_cost: f64,
    /// `total_cost` averaged over the days the position was populated.
    pub average_cost: f64,
    /// Number of days the position was populated.
    pub days: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: CategoryId,
    pub name: String,
    pub total: f64,
}

/// Full pricing breakdown returned by `GET /api/quotes/{id}/pricing`.
///
/// The accommodation entry in `category_totals` is the summary-derived
/// total, not the naive item sum; the grand totals weight each identity by
/// its head count.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct QuotePricing {
    pub identity_costs: IdentityCosts,
    pub identity_profits: IdentityProfits,
    pub category_totals: Vec<CategoryTotal>,
    pub accommodation_summary: Vec<AccommodationSummaryItem>,
    pub total_cost: f64,
    pub total_revenue: f64,
    pub total_profit: f64,
}
