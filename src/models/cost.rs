use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Closed set of cost buckets on a group quote. The set is fixed at quote
/// creation and never changes for the life of the quote.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryId {
    Transport,
    GroupTransport,
    Accommodation,
    Meals,
    Activities,
    Others,
    Guide,
}

impl CategoryId {
    /// Quote-sheet display label for the category.
    pub fn display_name(&self) -> &str {
        match self {
            CategoryId::Transport => "交通費",
            CategoryId::GroupTransport => "團體交通費",
            CategoryId::Accommodation => "住宿費",
            CategoryId::Meals => "餐費",
            CategoryId::Activities => "活動費",
            CategoryId::Others => "其他費用",
            CategoryId::Guide => "領隊導遊費",
        }
    }

    /// Categories in quote-sheet order.
    pub fn all() -> [CategoryId; 7] {
        [
            CategoryId::Transport,
            CategoryId::GroupTransport,
            CategoryId::Accommodation,
            CategoryId::Meals,
            CategoryId::Activities,
            CategoryId::Others,
            CategoryId::Guide,
        ]
    }
}

/// Stable tag replacing the legacy name matching for the reserved ticket
/// rows. Set when the row is created; the Chinese label stays display-only.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IdentityRole {
    Adult,
    Child,
    Infant,
    #[default]
    None,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PricingMode {
    #[default]
    Uniform,
    ByIdentity,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Restaurant,
    Hotel,
    Attraction,
}

impl ResourceKind {
    pub fn as_str(&self) -> &str {
        match self {
            ResourceKind::Restaurant => "restaurant",
            ResourceKind::Hotel => "hotel",
            ResourceKind::Attraction => "attraction",
        }
    }
}

/// Linkage to a looked-up place (restaurant/hotel/attraction) stamped onto a
/// cost item by the resource selector.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ResourceLink {
    pub kind: ResourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// One priced line on the quote sheet.
///
/// `total` is always derived from the other fields by the category engine;
/// nothing may write it directly.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CostItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub unit_price: Option<f64>,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(default)]
    pub is_same_as_previous: bool,
    #[serde(default)]
    pub is_group_cost: bool,
    #[serde(default)]
    pub is_self_arranged: bool,
    #[serde(default)]
    pub is_guide_share: bool,
    #[serde(default)]
    pub pricing_mode: PricingMode,
    #[serde(default)]
    pub identity_role: IdentityRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adult_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infant_price: Option<f64>,
    // Source expressions for numeric fields, shown in the sheet as entered.
    // Never evaluated here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_price_formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub adult_price_formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_price_formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infant_price_formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<ResourceLink>,
}

impl CostItem {
    /// Fresh zero-valued row, ready for staff to fill in.
    pub fn new(name: &str) -> Self {
        CostItem {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            quantity: None,
            unit_price: None,
            total: 0.0,
            note: String::new(),
            day: None,
            room_type: None,
            is_same_as_previous: false,
            is_group_cost: false,
            is_self_arranged: false,
            is_guide_share: false,
            pricing_mode: PricingMode::Uniform,
            identity_role: IdentityRole::None,
            adult_price: None,
            child_price: None,
            infant_price: None,
            quantity_formula: None,
            unit_price_formula: None,
            adult_price_formula: None,
            child_price_formula: None,
            infant_price_formula: None,
            resource: None,
        }
    }

    /// Quantity used in every price formula: an unset or zero quantity
    /// counts as 1.
    pub fn effective_quantity(&self) -> u32 {
        match self.quantity {
            Some(q) if q > 0 => q,
            _ => 1,
        }
    }

    pub fn unit_price_or_zero(&self) -> f64 {
        self.unit_price.unwrap_or(0.0)
    }
}

/// Named bucket of cost items with its running total.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct CostCategory {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<CostItem>,
    #[serde(default)]
    pub total: f64,
}

impl CostCategory {
    pub fn new(id: CategoryId) -> Self {
        CostCategory {
            id,
            name: id.display_name().to_string(),
            items: Vec::new(),
            total: 0.0,
        }
    }

    /// Plain sum of the contained item totals.
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(|item| item.total).sum()
    }
}

/// The fixed category template seeded into every new group quote.
///
/// Transport starts with the three reserved ticket rows (tagged by role, the
/// labels are display-only), group-transport with the derived guide-share
/// row, and guide with a single group-shared fee row.
pub fn default_categories() -> Vec<CostCategory> {
    CategoryId::all()
        .into_iter()
        .map(|id| {
            let mut category = CostCategory::new(id);
            match id {
                CategoryId::Transport => {
                    let mut adult_ticket = CostItem::new("成人機票");
                    adult_ticket.identity_role = IdentityRole::Adult;
                    adult_ticket.pricing_mode = PricingMode::ByIdentity;

                    let mut child_ticket = CostItem::new("小孩機票");
                    child_ticket.identity_role = IdentityRole::Child;
                    child_ticket.pricing_mode = PricingMode::ByIdentity;

                    let mut infant_ticket = CostItem::new("嬰兒機票");
                    infant_ticket.identity_role = IdentityRole::Infant;
                    infant_ticket.pricing_mode = PricingMode::ByIdentity;

                    category.items = vec![adult_ticket, child_ticket, infant_ticket];
                }
                CategoryId::GroupTransport => {
                    let mut guide_share = CostItem::new("領隊分攤");
                    guide_share.is_guide_share = true;
                    guide_share.quantity = Some(1);
                    category.items = vec![guide_share];
                }
                CategoryId::Guide => {
                    let mut guide_fee = CostItem::new("領隊費");
                    guide_fee.is_group_cost = true;
                    category.items = vec![guide_fee];
                }
                _ => {}
            }
            category
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_has_all_seven_categories_in_order() {
        let categories = default_categories();
        let ids: Vec<CategoryId> = categories.iter().map(|c| c.id).collect();
        assert_eq!(ids, CategoryId::all().to_vec());
    }

    #[test]
    fn template_seeds_reserved_rows() {
        let categories = default_categories();

        let transport = &categories[0];
        assert_eq!(transport.items.len(), 3);
        assert_eq!(transport.items[0].identity_role, IdentityRole::Adult);
        assert_eq!(transport.items[1].identity_role, IdentityRole::Child);
        assert_eq!(transport.items[2].identity_role, IdentityRole::Infant);

        let group_transport = &categories[1];
        assert!(group_transport.items[0].is_guide_share);
        assert_eq!(group_transport.items[0].name, "領隊分攤");

        let guide = &categories[6];
        assert!(guide.items[0].is_group_cost);
    }

    #[test]
    fn effective_quantity_defaults_to_one() {
        let mut item = CostItem::new("test");
        assert_eq!(item.effective_quantity(), 1);

        item.quantity = Some(0);
        assert_eq!(item.effective_quantity(), 1);

        item.quantity = Some(4);
        assert_eq!(item.effective_quantity(), 4);
    }

    #[test]
    fn category_id_serializes_kebab_case() {
        let json = serde_json::to_string(&CategoryId::GroupTransport).unwrap();
        assert_eq!(json, "\"group-transport\"");
    }
}
