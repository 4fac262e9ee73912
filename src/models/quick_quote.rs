use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One line of a quick quote. Same arithmetic as the general cost-item rule:
/// an unset or zero quantity counts as 1 and the total always rounds up.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct QuickQuoteItem {
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
}

impl QuickQuoteItem {
    pub fn new(name: &str) -> Self {
        QuickQuoteItem {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            quantity: None,
            unit_price: None,
            total: 0.0,
            note: String::new(),
        }
    }

    pub fn effective_quantity(&self) -> u32 {
        match self.quantity {
            Some(q) if q > 0 => q,
            _ => 1,
        }
    }
}

/// Lightweight flat price list stored in the `QuickQuotes` collection.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QuickQuote {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub items: Vec<QuickQuoteItem>,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub note: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl QuickQuote {
    /// Re-derives every item total and the sheet total. Run on every write
    /// so stored totals never drift from their inputs.
    pub fn recompute_totals(&mut self) {
        for item in &mut self.items {
            let unit_price = item.unit_price.unwrap_or(0.0);
            item.total = (item.effective_quantity() as f64 * unit_price).ceil().max(0.0);
        }
        self.total = self.items.iter().map(|item| item.total).sum();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recompute_rounds_each_line_up() {
        let mut quote = QuickQuote {
            id: None,
            title: "市區一日遊".to_string(),
            customer_name: None,
            items: vec![
                QuickQuoteItem {
                    quantity: Some(3),
                    unit_price: Some(333.5),
                    ..QuickQuoteItem::new("門票")
                },
                QuickQuoteItem {
                    quantity: None,
                    unit_price: Some(1200.0),
                    ..QuickQuoteItem::new("包車")
                },
            ],
            total: 0.0,
            note: String::new(),
            created_at: None,
            updated_at: None,
        };

        quote.recompute_totals();

        assert_eq!(quote.items[0].total, 1001.0); // ceil(3 * 333.5)
        assert_eq!(quote.items[1].total, 1200.0); // quantity defaults to 1
        assert_eq!(quote.total, 2201.0);
    }

    #[test]
    fn missing_price_counts_as_zero() {
        let mut quote = QuickQuote {
            id: None,
            title: String::new(),
            customer_name: None,
            items: vec![QuickQuoteItem::new("未定")],
            total: 99.0,
            note: String::new(),
            created_at: None,
            updated_at: None,
        };

        quote.recompute_totals();
        assert_eq!(quote.items[0].total, 0.0);
        assert_eq!(quote.total, 0.0);
    }
}
