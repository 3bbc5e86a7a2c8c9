use serde::{Deserialize, Serialize};

/// Category assigned to rows that leave the `category` column empty.
pub const DEFAULT_CATEGORY: &str = "Other";

/// A single dated emission row as ingested from the dataset.
///
/// `date` keeps the raw cell text; it is only interpreted as a calendar date
/// by the aggregator, so the preview sample shows exactly what was read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionRecord {
    pub date: String,
    pub emissions_kg: f64,
    pub category: String,
    pub amount: f64,
}

impl Default for EmissionRecord {
    fn default() -> Self {
        EmissionRecord {
            date: String::new(),
            emissions_kg: 0.0,
            category: DEFAULT_CATEGORY.to_string(),
            amount: 0.0,
        }
    }
}

impl EmissionRecord {
    pub fn new(date: &str, emissions_kg: f64) -> Self {
        EmissionRecord {
            date: date.to_string(),
            emissions_kg,
            ..Default::default()
        }
    }

    /// Set the category, falling back to [`DEFAULT_CATEGORY`] when blank.
    pub fn with_category(mut self, category: &str) -> Self {
        self.category = if category.trim().is_empty() {
            DEFAULT_CATEGORY.to_string()
        } else {
            category.trim().to_string()
        };
        self
    }

    pub fn with_amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    /// True when the date cell is empty (after trimming).
    pub fn is_undated(&self) -> bool {
        self.date.trim().is_empty()
    }
}
