use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};

use crate::models::cost::default_categories;
use crate::models::quote::{CreateQuoteInput, GroupQuote, UpdateQuoteInput};

pub struct QuoteService;

impl QuoteService {
    /// Human-readable quote number, e.g. `GQ-7K2F9QX1`.
    pub fn generate_quote_number() -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(char::from)
            .collect::<String>()
            .to_uppercase();

        format!("GQ-{}", suffix)
    }

    /// Assemble a fresh quote from the create payload: fixed category
    /// template, generated quote number, draft status, stamped timestamps.
    pub fn new_quote(input: CreateQuoteInput) -> GroupQuote {
        let now = Utc::now();

        GroupQuote {
            id: None,
            quote_number: Self::generate_quote_number(),
            group_name: input.group_name,
            customer_name: input.customer_name,
            contact_phone: input.contact_phone,
            departure_date: input.departure_date,
            total_days: input.total_days,
            participants: input.participants.unwrap_or_default(),
            selling_prices: input.selling_prices.unwrap_or_default(),
            categories: default_categories(),
            accommodation_days: 0,
            tiers: Vec::new(),
            note: input.note.unwrap_or_default(),
            status: "draft".to_string(),
            created_at: Some(now),
            updated_at: Some(now),
        }
    }

    /// Merge header fields from a PUT payload. Absent fields keep their
    /// current values; items, counts and prices never pass through here.
    pub fn apply_header_update(quote: &mut GroupQuote, update: UpdateQuoteInput) {
        if let Some(group_name) = update.group_name {
            quote.group_name = group_name;
        }
        if update.customer_name.is_some() {
            quote.customer_name = update.customer_name;
        }
        if update.contact_phone.is_some() {
            quote.contact_phone = update.contact_phone;
        }
        if update.departure_date.is_some() {
            quote.departure_date = update.departure_date;
        }
        if let Some(total_days) = update.total_days {
            quote.total_days = total_days;
        }
        if let Some(note) = update.note {
            quote.note = note;
        }
        if let Some(status) = update.status {
            quote.status = status;
        }
        quote.updated_at = Some(Utc::now());
    }
}
