use crate::models::cost::{CategoryId, CostCategory, CostItem};
use crate::models::itinerary::ItineraryDay;
use crate::services::category_service::{CategoryService, QuoteState};

pub struct ItineraryImportService;

impl ItineraryImportService {
    /// Seed cost rows from day-tagged itinerary records: hotels become
    /// accommodation rows, meals become meal rows (自理 entries arrive
    /// pre-zeroed), activities become activity rows. Prices start at zero
    /// for staff to fill in; the usual derived values are refreshed on the
    /// way out.
    pub fn seed_items(state: &QuoteState, days: &[ItineraryDay]) -> QuoteState {
        let mut next = state.clone();
        let counts = next.participants;

        let mut records: Vec<&ItineraryDay> = days.iter().collect();
        records.sort_by_key(|record| record.day);

        let mut previous_hotel: Option<String> = None;
        let mut last_day = next.accommodation_days;

        for record in records {
            let meals = [
                ("早餐", &record.breakfast),
                ("午餐", &record.lunch),
                ("晚餐", &record.dinner),
            ];
            for (slot, value) in meals {
                let name = match value {
                    Some(name) if !name.is_empty() => name,
                    _ => continue,
                };

                let mut item = CostItem::new(name);
                item.day = Some(record.day);
                item.note = slot.to_string();
                item.is_self_arranged = name.contains("自理");
                CategoryService::recompute_item_total(CategoryId::Meals, &mut item, &counts);
                Self::push_item(&mut next.categories, CategoryId::Meals, item);
            }

            match &record.hotel {
                Some(hotel) if !hotel.is_empty() => {
                    let mut item = CostItem::new(hotel);
                    item.day = Some(record.day);
                    item.room_type = record.room_type.clone();
                    item.is_same_as_previous =
                        previous_hotel.as_deref() == Some(hotel.as_str());
                    Self::push_item(&mut next.categories, CategoryId::Accommodation, item);

                    if record.day > last_day {
                        last_day = record.day;
                    }
                    previous_hotel = Some(hotel.clone());
                }
                // A night without a hotel breaks the continuation chain.
                _ => previous_hotel = None,
            }

            for activity in &record.activities {
                if activity.is_empty() {
                    continue;
                }
                let mut item = CostItem::new(activity);
                item.day = Some(record.day);
                Self::push_item(&mut next.categories, CategoryId::Activities, item);
            }
        }

        next.accommodation_days = last_day;

        // Imported rooms feed the guide-share line like hand-entered ones.
        CategoryService::refresh_guide_share(&mut next);
        CategoryService::refresh_category_totals(&mut next.categories);

        next
    }

    fn push_item(categories: &mut [CostCategory], id: CategoryId, item: CostItem) {
        if let Some(category) = categories.iter_mut().find(|c| c.id == id) {
            category.items.push(item);
        }
    }
}
