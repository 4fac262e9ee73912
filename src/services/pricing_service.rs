use crate::models::cost::{CategoryId, CostCategory, CostItem, IdentityRole};
use crate::models::participants::{
    IdentityCosts, IdentityProfits, ParticipantCounts, SellingPrices,
};
use crate::models::pricing::{AccommodationSummaryItem, CategoryTotal, QuotePricing};

use std::collections::BTreeMap;

pub struct PricingService;

impl PricingService {
    /// Walk every category and produce the per-identity cost vector.
    ///
    /// Pure function of the category contents: group-shared items (guide,
    /// group-transport) contribute their stored per-person totals, which the
    /// category engine keeps divided by the current group size.
    pub fn identity_costs(categories: &[CostCategory]) -> IdentityCosts {
        let mut costs = IdentityCosts::default();

        for category in categories {
            match category.id {
                CategoryId::Transport => Self::allocate_transport(category, &mut costs),
                CategoryId::Accommodation => Self::allocate_accommodation(category, &mut costs),
                CategoryId::Meals | CategoryId::Activities | CategoryId::Others => {
                    Self::allocate_per_person(category, &mut costs)
                }
                CategoryId::GroupTransport | CategoryId::Guide => {
                    Self::allocate_group_shared(category, &mut costs)
                }
            }
        }

        costs
    }

    /// Ticket rows charge only their own identity set; any other transport
    /// line is a flat per-person price for the bed-holding identities.
    fn allocate_transport(category: &CostCategory, costs: &mut IdentityCosts) {
        for item in &category.items {
            match item.identity_role {
                IdentityRole::Adult => {
                    let price = item.adult_price.unwrap_or(0.0);
                    costs.adult += price;
                    costs.single_room += price;
                }
                IdentityRole::Child => {
                    let price = item.child_price.unwrap_or(0.0);
                    costs.child_with_bed += price;
                    costs.child_no_bed += price;
                }
                IdentityRole::Infant => {
                    costs.infant += item.infant_price.unwrap_or(0.0);
                }
                IdentityRole::None => {
                    let price = item.unit_price_or_zero();
                    costs.adult += price;
                    costs.child_with_bed += price;
                    costs.single_room += price;
                }
            }
        }
    }

    /// Only the first room listed per day feeds the identity vector: half
    /// the room price (rounded up) for twin-share identities, the full
    /// price for single rooms. Later rooms of the same day only show up in
    /// the accommodation summary.
    fn allocate_accommodation(category: &CostCategory, costs: &mut IdentityCosts) {
        for item in Self::first_rooms(category) {
            let unit_price = item.unit_price_or_zero();
            let half = (unit_price / 2.0).ceil();
            costs.adult += half;
            costs.child_with_bed += half;
            costs.single_room += unit_price;
        }
    }

    fn allocate_per_person(category: &CostCategory, costs: &mut IdentityCosts) {
        for item in &category.items {
            let price = item.unit_price_or_zero();
            costs.adult += price;
            costs.child_with_bed += price;
            costs.single_room += price;
        }
    }

    /// Group-shared totals are already per-person; every identity except
    /// infants pays them.
    fn allocate_group_shared(category: &CostCategory, costs: &mut IdentityCosts) {
        for item in &category.items {
            costs.adult += item.total;
            costs.child_with_bed += item.total;
            costs.child_no_bed += item.total;
            costs.single_room += item.total;
        }
    }

    /// The first room listed for each distinct day, in sheet order. Items
    /// without a day are counted under day 1.
    pub fn first_rooms(category: &CostCategory) -> Vec<&CostItem> {
        let mut seen_days: Vec<u32> = Vec::new();
        let mut rooms = Vec::new();

        for item in &category.items {
            let day = item.day.unwrap_or(1);
            if !seen_days.contains(&day) {
                seen_days.push(day);
                rooms.push(item);
            }
        }

        rooms
    }

    /// Accommodation breakdown grouped by room position: the 1st room listed
    /// each day forms one row, the 2nd room another, and so on across days.
    pub fn accommodation_summary(categories: &[CostCategory]) -> Vec<AccommodationSummaryItem> {
        let category = match categories.iter().find(|c| c.id == CategoryId::Accommodation) {
            Some(category) => category,
            None => return Vec::new(),
        };

        let mut by_day: BTreeMap<u32, Vec<&CostItem>> = BTreeMap::new();
        for item in &category.items {
            by_day.entry(item.day.unwrap_or(1)).or_default().push(item);
        }

        let positions = by_day.values().map(|rooms| rooms.len()).max().unwrap_or(0);
        let mut summary = Vec::with_capacity(positions);

        for position in 0..positions {
            let mut name = String::new();
            let mut total_cost = 0.0;
            let mut days = 0u32;

            for rooms in by_day.values() {
                if let Some(item) = rooms.get(position) {
                    if name.is_empty() && !item.name.is_empty() {
                        name = item.name.clone();
                    }
                    total_cost += item.total;
                    days += 1;
                }
            }

            let average_cost = if days > 0 { total_cost / days as f64 } else { 0.0 };

            summary.push(AccommodationSummaryItem {
                name,
                total_cost,
                average_cost,
                days,
            });
        }

        summary
    }

    /// Ordered per-category totals for the quote sheet. Accommodation is
    /// reported as the sum of its summary rows rather than the raw item sum
    /// so occupancy-divided rooms are not double counted.
    pub fn category_totals(categories: &[CostCategory]) -> Vec<CategoryTotal> {
        let accommodation_total: f64 = Self::accommodation_summary(categories)
            .iter()
            .map(|row| row.total_cost)
            .sum();

        categories
            .iter()
            .map(|category| {
                let total = if category.id == CategoryId::Accommodation {
                    accommodation_total
                } else {
                    category.items_total()
                };

                CategoryTotal {
                    category: category.id,
                    name: category.name.clone(),
                    total,
                }
            })
            .collect()
    }

    /// Profit is always selling price minus cost, identity by identity.
    pub fn identity_profits(
        selling_prices: &SellingPrices,
        costs: &IdentityCosts,
    ) -> IdentityProfits {
        IdentityProfits {
            adult: selling_prices.adult - costs.adult,
            child_with_bed: selling_prices.child_with_bed - costs.child_with_bed,
            child_no_bed: selling_prices.child_no_bed - costs.child_no_bed,
            single_room: selling_prices.single_room - costs.single_room,
            infant: selling_prices.infant - costs.infant,
        }
    }

    /// Full breakdown for one quote. Grand totals weight each identity by
    /// its head count.
    pub fn quote_pricing(
        categories: &[CostCategory],
        counts: &ParticipantCounts,
        selling_prices: &SellingPrices,
    ) -> QuotePricing {
        let identity_costs = Self::identity_costs(categories);
        let identity_profits = Self::identity_profits(selling_prices, &identity_costs);
        let accommodation_summary = Self::accommodation_summary(categories);
        let category_totals = Self::category_totals(categories);

        let total_cost = counts.adult as f64 * identity_costs.adult
            + counts.child_with_bed as f64 * identity_costs.child_with_bed
            + counts.child_no_bed as f64 * identity_costs.child_no_bed
            + counts.single_room as f64 * identity_costs.single_room
            + counts.infant as f64 * identity_costs.infant;

        let total_revenue = counts.adult as f64 * selling_prices.adult
            + counts.child_with_bed as f64 * selling_prices.child_with_bed
            + counts.child_no_bed as f64 * selling_prices.child_no_bed
            + counts.single_room as f64 * selling_prices.single_room
            + counts.infant as f64 * selling_prices.infant;

        QuotePricing {
            identity_costs,
            identity_profits,
            category_totals,
            accommodation_summary,
            total_cost,
            total_revenue,
            total_profit: total_revenue - total_cost,
        }
    }
}
