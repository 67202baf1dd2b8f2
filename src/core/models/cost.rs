use serde::{Deserialize, Serialize};

/// Estimated API spend for one generation, in USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
    pub currency: String,
}

impl CostBreakdown {
    pub fn usd(input_cost: f64, output_cost: f64) -> Self {
        Self {
            input_cost,
            output_cost,
            total_cost: input_cost + output_cost,
            currency: "USD".to_string(),
        }
    }

    /// Copy with every amount rounded to `places` decimals.
    pub fn rounded(&self, places: i32) -> Self {
        use crate::core::formatter::round_to;
        Self {
            input_cost: round_to(self.input_cost, places),
            output_cost: round_to(self.output_cost, places),
            total_cost: round_to(self.total_cost, places),
            currency: self.currency.clone(),
        }
    }
}
