use serde::{Deserialize, Serialize};

use crate::models::cost::{
    CategoryId, CostCategory, CostItem, IdentityRole, PricingMode, ResourceLink,
};
use crate::models::participants::{ParticipantCounts, SellingPrices};
use crate::models::quote::GroupQuote;
use crate::services::pricing_service::PricingService;

/// The editable slice of a group quote. Owned by the caller and threaded
/// through `CategoryService::apply_edit`; the service never holds state of
/// its own.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteState {
    pub categories: Vec<CostCategory>,
    pub participants: ParticipantCounts,
    pub selling_prices: SellingPrices,
    pub accommodation_days: u32,
}

impl QuoteState {
    pub fn from_quote(quote: &GroupQuote) -> Self {
        QuoteState {
            categories: quote.categories.clone(),
            participants: quote.participants,
            selling_prices: quote.selling_prices,
            accommodation_days: quote.accommodation_days,
        }
    }

    pub fn apply_to(self, quote: &mut GroupQuote) {
        quote.categories = self.categories;
        quote.participants = self.participants;
        quote.selling_prices = self.selling_prices;
        quote.accommodation_days = self.accommodation_days;
    }
}

/// One edit against the quote sheet, as posted to the edits endpoint.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum QuoteEdit {
    AddItem {
        category: CategoryId,
        #[serde(default)]
        day: Option<u32>,
        #[serde(default)]
        room_type: Option<String>,
    },
    UpdateItem {
        category: CategoryId,
        item_id: String,
        field: ItemField,
    },
    RemoveItem {
        category: CategoryId,
        item_id: String,
    },
    SetParticipants {
        participants: ParticipantCounts,
    },
    SetSellingPrices {
        selling_prices: SellingPrices,
    },
}

/// A single field assignment on one cost item.
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum ItemField {
    Name(String),
    Quantity(Option<u32>),
    UnitPrice(Option<f64>),
    Note(String),
    Day(Option<u32>),
    RoomType(Option<String>),
    SameAsPrevious(bool),
    GroupCost(bool),
    SelfArranged(bool),
    PricingMode(PricingMode),
    AdultPrice(Option<f64>),
    ChildPrice(Option<f64>),
    InfantPrice(Option<f64>),
    QuantityFormula(Option<String>),
    UnitPriceFormula(Option<String>),
    AdultPriceFormula(Option<String>),
    ChildPriceFormula(Option<String>),
    InfantPriceFormula(Option<String>),
    Resource(Option<ResourceLink>),
}

pub struct CategoryService;

impl CategoryService {
    /// Apply one edit and return the next state with every derived value
    /// brought back in line: the edited item's total, the guide-share line
    /// when its inputs moved, and the per-category totals.
    ///
    /// Never fails. Edits naming an unknown category or item id fall
    /// through and leave the state as it was.
    pub fn apply_edit(state: &QuoteState, edit: QuoteEdit) -> QuoteState {
        let mut next = state.clone();

        // The guide-share unit price is derived from accommodation and
        // transport contents, so edits there ripple into group-transport.
        let feeds_guide_share = match &edit {
            QuoteEdit::AddItem { category, .. }
            | QuoteEdit::UpdateItem { category, .. }
            | QuoteEdit::RemoveItem { category, .. } => {
                matches!(category, CategoryId::Transport | CategoryId::Accommodation)
            }
            _ => false,
        };

        match edit {
            QuoteEdit::AddItem {
                category,
                day,
                room_type,
            } => {
                let mut tracked_days = next.accommodation_days;
                if let Some(target) = next.categories.iter_mut().find(|c| c.id == category) {
                    let mut item = CostItem::new("");
                    item.room_type = room_type;

                    if category == CategoryId::Accommodation {
                        let day = day.unwrap_or_else(|| tracked_days.max(1));
                        item.day = Some(day);
                        if day > tracked_days {
                            tracked_days = day;
                        }
                    } else {
                        item.day = day;
                    }

                    target.items.push(item);
                }
                next.accommodation_days = tracked_days;
            }
            QuoteEdit::UpdateItem {
                category,
                item_id,
                field,
            } => {
                let counts = next.participants;
                if let Some(target) = next.categories.iter_mut().find(|c| c.id == category) {
                    if let Some(item) = target.items.iter_mut().find(|i| i.id == item_id) {
                        if Self::apply_field(item, field) {
                            Self::recompute_item_total(category, item, &counts);
                        }
                    }
                }
            }
            QuoteEdit::RemoveItem { category, item_id } => {
                let mut tracked_days = next.accommodation_days;
                if let Some(target) = next.categories.iter_mut().find(|c| c.id == category) {
                    let before = target.items.len();
                    target.items.retain(|item| item.id != item_id);

                    if target.items.len() != before && category == CategoryId::Accommodation {
                        tracked_days = Self::renumber_accommodation_days(target);
                    }
                }
                next.accommodation_days = tracked_days;
            }
            QuoteEdit::SetParticipants { participants } => {
                next.participants = participants;
                Self::recompute_group_shared(&mut next.categories, &participants);
            }
            QuoteEdit::SetSellingPrices { selling_prices } => {
                next.selling_prices = selling_prices;
            }
        }

        if feeds_guide_share {
            Self::refresh_guide_share(&mut next);
        }
        Self::refresh_category_totals(&mut next.categories);

        next
    }

    /// Assign one field. Returns true when the field feeds the total
    /// formula and the item has to be recomputed.
    fn apply_field(item: &mut CostItem, field: ItemField) -> bool {
        match field {
            ItemField::Name(value) => {
                item.name = value;
                false
            }
            ItemField::Quantity(value) => {
                item.quantity = value;
                true
            }
            ItemField::UnitPrice(value) => {
                item.unit_price = value;
                true
            }
            ItemField::Note(value) => {
                item.note = value;
                false
            }
            ItemField::Day(value) => {
                item.day = value;
                false
            }
            ItemField::RoomType(value) => {
                item.room_type = value;
                false
            }
            ItemField::SameAsPrevious(value) => {
                item.is_same_as_previous = value;
                false
            }
            ItemField::GroupCost(value) => {
                item.is_group_cost = value;
                true
            }
            ItemField::SelfArranged(value) => {
                item.is_self_arranged = value;
                true
            }
            ItemField::PricingMode(value) => {
                item.pricing_mode = value;
                false
            }
            ItemField::AdultPrice(value) => {
                item.adult_price = value;
                true
            }
            ItemField::ChildPrice(value) => {
                item.child_price = value;
                true
            }
            ItemField::InfantPrice(value) => {
                item.infant_price = value;
                true
            }
            ItemField::QuantityFormula(value) => {
                item.quantity_formula = value;
                false
            }
            ItemField::UnitPriceFormula(value) => {
                item.unit_price_formula = value;
                false
            }
            ItemField::AdultPriceFormula(value) => {
                item.adult_price_formula = value;
                false
            }
            ItemField::ChildPriceFormula(value) => {
                item.child_price_formula = value;
                false
            }
            ItemField::InfantPriceFormula(value) => {
                item.infant_price_formula = value;
                false
            }
            ItemField::Resource(value) => {
                item.resource = value;
                false
            }
        }
    }

    /// Re-derive one item's total. Division results always round up so the
    /// business never under-charges.
    pub fn recompute_item_total(
        category: CategoryId,
        item: &mut CostItem,
        counts: &ParticipantCounts,
    ) {
        // Self-arranged wins over everything and also clears the price.
        if item.is_self_arranged {
            item.unit_price = Some(0.0);
            item.total = 0.0;
            return;
        }

        // Ticket rows carry their identity price verbatim; quantity is a
        // head count for display, not a multiplier.
        if category == CategoryId::Transport {
            let identity_price = match item.identity_role {
                IdentityRole::Adult => Some(item.adult_price.unwrap_or(0.0)),
                IdentityRole::Child => Some(item.child_price.unwrap_or(0.0)),
                IdentityRole::Infant => Some(item.infant_price.unwrap_or(0.0)),
                IdentityRole::None => None,
            };
            if let Some(price) = identity_price {
                item.total = price.max(0.0);
                return;
            }
        }

        let quantity = item.effective_quantity() as f64;
        let unit_price = item.unit_price_or_zero();

        let total = match category {
            // Room price split across its occupants.
            CategoryId::Accommodation => (unit_price / quantity).ceil(),
            CategoryId::Transport | CategoryId::Guide
                if item.is_group_cost && counts.group_size() > 1 =>
            {
                (quantity * unit_price / counts.group_size() as f64).ceil()
            }
            CategoryId::GroupTransport if item.is_guide_share => {
                let divisor = counts.group_size_for_guide();
                if divisor > 0 {
                    (quantity * unit_price / divisor as f64).ceil()
                } else {
                    0.0
                }
            }
            CategoryId::GroupTransport => {
                let divisor = counts.group_size_for_guide();
                if divisor > 1 {
                    (quantity * unit_price / divisor as f64).ceil()
                } else {
                    (quantity * unit_price).ceil()
                }
            }
            _ => (quantity * unit_price).ceil(),
        };

        item.total = total.max(0.0);
    }

    /// Re-divide every group-shared total under the current counts: the
    /// guide category, all of group-transport, and transport lines flagged
    /// as group costs.
    pub fn recompute_group_shared(categories: &mut [CostCategory], counts: &ParticipantCounts) {
        for category in categories.iter_mut() {
            match category.id {
                CategoryId::GroupTransport | CategoryId::Guide => {
                    for item in category.items.iter_mut() {
                        Self::recompute_item_total(category.id, item, counts);
                    }
                }
                CategoryId::Transport => {
                    for item in category.items.iter_mut().filter(|i| i.is_group_cost) {
                        Self::recompute_item_total(CategoryId::Transport, item, counts);
                    }
                }
                _ => {}
            }
        }
    }

    /// The guide-share unit price is not user-entered: the group absorbs
    /// the guide's room (first room of each day) and adult ticket.
    pub fn derived_guide_share_unit(categories: &[CostCategory]) -> f64 {
        let nightly_rooms: f64 = categories
            .iter()
            .find(|c| c.id == CategoryId::Accommodation)
            .map(|category| {
                PricingService::first_rooms(category)
                    .iter()
                    .map(|item| item.unit_price_or_zero())
                    .sum()
            })
            .unwrap_or(0.0);

        let adult_ticket = categories
            .iter()
            .find(|c| c.id == CategoryId::Transport)
            .and_then(|category| {
                category
                    .items
                    .iter()
                    .find(|item| item.identity_role == IdentityRole::Adult)
            })
            .and_then(|item| item.adult_price)
            .unwrap_or(0.0);

        nightly_rooms + adult_ticket
    }

    /// Re-derive the guide-share line from current accommodation and
    /// transport contents, then re-divide it.
    pub fn refresh_guide_share(state: &mut QuoteState) {
        let unit_price = Self::derived_guide_share_unit(&state.categories);
        let counts = state.participants;

        if let Some(category) = state
            .categories
            .iter_mut()
            .find(|c| c.id == CategoryId::GroupTransport)
        {
            for item in category.items.iter_mut().filter(|i| i.is_guide_share) {
                item.unit_price = Some(unit_price);
                Self::recompute_item_total(CategoryId::GroupTransport, item, &counts);
            }
        }
    }

    pub fn refresh_category_totals(categories: &mut [CostCategory]) {
        for category in categories.iter_mut() {
            category.total = category.items_total();
        }
    }

    /// Compact the day numbering after a removal so days run 1..n with no
    /// gaps. Returns the new day count.
    fn renumber_accommodation_days(category: &mut CostCategory) -> u32 {
        let mut days: Vec<u32> = category.items.iter().filter_map(|item| item.day).collect();
        days.sort_unstable();
        days.dedup();

        for item in category.items.iter_mut() {
            if let Some(day) = item.day {
                if let Some(position) = days.iter().position(|d| *d == day) {
                    item.day = Some(position as u32 + 1);
                }
            }
        }

        days.len() as u32
    }
}
