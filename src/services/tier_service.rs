use uuid::Uuid;

use crate::models::cost::CostCategory;
use crate::models::participants::{ParticipantCounts, SellingPrices};
use crate::models::tier::TierPricing;
use crate::services::category_service::CategoryService;
use crate::services::pricing_service::PricingService;

pub struct TierService;

impl TierService {
    /// Scale the base counts towards a new target total, keeping the mix of
    /// identities. Each field rounds to the nearest integer on its own, so
    /// the scaled sum can drift a head or two off the target; that drift is
    /// accepted rather than papered over with a correction pass.
    pub fn scale_participant_counts(
        counts: &ParticipantCounts,
        target_total: u32,
    ) -> ParticipantCounts {
        let original_total = counts.group_size();
        // An empty base group scales by 1, never divides by zero.
        let ratio = if original_total == 0 {
            1.0
        } else {
            target_total as f64 / original_total as f64
        };

        let scale = |count: u32| (count as f64 * ratio).round() as u32;

        ParticipantCounts {
            adult: scale(counts.adult),
            child_with_bed: scale(counts.child_with_bed),
            child_no_bed: scale(counts.child_no_bed),
            single_room: scale(counts.single_room),
            infant: scale(counts.infant),
        }
    }

    /// Price a what-if scenario for a different group size without touching
    /// the base quote. Item data stays as entered; only the group-shared
    /// totals are re-divided under the scaled counts before the identity
    /// costs are aggregated.
    pub fn build_tier(
        categories: &[CostCategory],
        counts: &ParticipantCounts,
        selling_prices: &SellingPrices,
        target_total: u32,
    ) -> TierPricing {
        let scaled_counts = Self::scale_participant_counts(counts, target_total);

        let mut scenario = categories.to_vec();
        CategoryService::recompute_group_shared(&mut scenario, &scaled_counts);

        let identity_costs = PricingService::identity_costs(&scenario);
        let identity_profits = PricingService::identity_profits(selling_prices, &identity_costs);

        TierPricing {
            id: Uuid::new_v4().to_string(),
            participant_count: target_total,
            participant_counts: scaled_counts,
            identity_costs,
            selling_prices: *selling_prices,
            identity_profits,
        }
    }

    /// Bring a tier's profits back in line after its selling prices were
    /// edited. Costs are frozen at tier creation.
    pub fn recompute_profits(tier: &mut TierPricing) {
        tier.identity_profits =
            PricingService::identity_profits(&tier.selling_prices, &tier.identity_costs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cost::{CategoryId, IdentityRole};

    fn base_counts() -> ParticipantCounts {
        ParticipantCounts {
            adult: 13,
            child_with_bed: 1,
            child_no_bed: 1,
            single_room: 1,
            infant: 1,
        }
    }

    #[test]
    fn scaling_to_the_same_total_is_a_no_op() {
        let counts = base_counts();
        let scaled = TierService::scale_participant_counts(&counts, counts.group_size());
        assert_eq!(scaled, counts);
    }

    #[test]
    fn scaling_an_empty_group_stays_empty() {
        let counts = ParticipantCounts::default();
        let scaled = TierService::scale_participant_counts(&counts, 20);
        assert_eq!(scaled, ParticipantCounts::default());
    }

    #[test]
    fn target_zero_clears_every_identity() {
        let scaled = TierService::scale_participant_counts(&base_counts(), 0);
        assert_eq!(scaled, ParticipantCounts::default());
    }

    #[test]
    fn fields_round_independently_of_the_target_sum() {
        let counts = ParticipantCounts {
            adult: 4,
            child_with_bed: 4,
            child_no_bed: 4,
            single_room: 4,
            infant: 0,
        };
        // Ratio 10/16 puts every field at 2.5, which rounds up to 3 each.
        let scaled = TierService::scale_participant_counts(&counts, 10);
        assert_eq!(scaled.adult, 3);
        assert_eq!(scaled.child_with_bed, 3);
        assert_eq!(scaled.child_no_bed, 3);
        assert_eq!(scaled.single_room, 3);
        assert_eq!(scaled.group_size(), 12);
    }

    #[test]
    fn infants_scale_with_the_group_ratio() {
        let counts = ParticipantCounts {
            adult: 8,
            infant: 2,
            ..ParticipantCounts::default()
        };
        let scaled = TierService::scale_participant_counts(&counts, 16);
        assert_eq!(scaled.adult, 16);
        assert_eq!(scaled.infant, 4);
    }

    #[test]
    fn tier_redivides_group_shared_costs_only() {
        let mut categories = crate::models::cost::default_categories();
        let counts = ParticipantCounts {
            adult: 16,
            ..ParticipantCounts::default()
        };

        // Adult ticket priced per head, guide fee shared by the group.
        if let Some(transport) = categories.iter_mut().find(|c| c.id == CategoryId::Transport) {
            transport.items[0].adult_price = Some(20000.0);
            transport.items[0].total = 20000.0;
        }
        if let Some(guide) = categories.iter_mut().find(|c| c.id == CategoryId::Guide) {
            guide.items[0].unit_price = Some(32000.0);
            guide.items[0].total = 2000.0; // divided by the base 16
        }

        let selling = SellingPrices::default();
        let tier = TierService::build_tier(&categories, &counts, &selling, 8);

        assert_eq!(tier.participant_counts.adult, 8);
        // The guide fee now splits 8 ways; the ticket price is untouched.
        assert_eq!(tier.identity_costs.adult, 20000.0 + 4000.0);
        assert_eq!(tier.identity_costs.child_no_bed, 4000.0);

        // The base categories kept their own division.
        let guide = categories
            .iter()
            .find(|c| c.id == CategoryId::Guide)
            .unwrap();
        assert_eq!(guide.items[0].total, 2000.0);
    }

    #[test]
    fn tier_profits_follow_edited_selling_prices() {
        let categories = crate::models::cost::default_categories();
        let counts = ParticipantCounts {
            adult: 10,
            ..ParticipantCounts::default()
        };
        let selling = SellingPrices {
            adult: 5000.0,
            ..SellingPrices::default()
        };

        let mut tier = TierService::build_tier(&categories, &counts, &selling, 10);
        assert_eq!(tier.identity_profits.adult, 5000.0);

        tier.selling_prices.adult = 6000.0;
        TierService::recompute_profits(&mut tier);
        assert_eq!(tier.identity_profits.adult, 6000.0);
    }

    #[test]
    fn guide_share_keeps_its_derived_price_across_tiers() {
        let mut categories = crate::models::cost::default_categories();
        let counts = ParticipantCounts {
            adult: 16,
            ..ParticipantCounts::default()
        };

        if let Some(group_transport) = categories
            .iter_mut()
            .find(|c| c.id == CategoryId::GroupTransport)
        {
            let share = &mut group_transport.items[0];
            assert!(share.is_guide_share);
            share.unit_price = Some(23000.0);
            share.total = 1438.0;
        }

        let tier = TierService::build_tier(&categories, &counts, &SellingPrices::default(), 8);
        // Same derived unit, new divisor: ceil(23000 / 8).
        assert_eq!(tier.identity_costs.adult, 2875.0);
    }

    #[test]
    fn ticket_allocation_survives_scaling_untouched() {
        let mut categories = crate::models::cost::default_categories();
        if let Some(transport) = categories.iter_mut().find(|c| c.id == CategoryId::Transport) {
            for item in transport.items.iter_mut() {
                match item.identity_role {
                    IdentityRole::Adult => item.adult_price = Some(10000.0),
                    IdentityRole::Child => item.child_price = Some(8000.0),
                    IdentityRole::Infant => item.infant_price = Some(1000.0),
                    IdentityRole::None => {}
                }
            }
        }

        let counts = base_counts();
        let tier = TierService::build_tier(&categories, &counts, &SellingPrices::default(), 32);

        assert_eq!(tier.identity_costs.adult, 10000.0);
        assert_eq!(tier.identity_costs.child_with_bed, 8000.0);
        assert_eq!(tier.identity_costs.child_no_bed, 8000.0);
        assert_eq!(tier.identity_costs.single_room, 10000.0);
        assert_eq!(tier.identity_costs.infant, 1000.0);
    }

    #[test]
    fn building_a_tier_never_mutates_the_base_categories() {
        let categories = crate::models::cost::default_categories();
        let snapshot = categories.clone();
        let _ = TierService::build_tier(
            &categories,
            &base_counts(),
            &SellingPrices::default(),
            30,
        );
        assert_eq!(categories, snapshot);
    }
}
