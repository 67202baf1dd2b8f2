use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::models::cost::CostBreakdown;
use crate::core::models::usage::TokenUsage;

/// The single record emitted per successful run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputRecord {
    pub topic: String,
    pub title: String,
    pub meta_description: String,
    /// HTML body
    pub content: String,
    pub keywords: Vec<String>,
    pub reading_time: u32,
    pub word_count: usize,
    pub image_suggestions: Vec<String>,
    pub tone: String,
    pub length: u32,
    pub include_image_suggestions: bool,
    pub seo_optimized: bool,
    pub model: String,
    /// Model name as reported by the API, when it differs or is routed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_model: Option<String>,
    pub usage: TokenUsage,
    pub cost_breakdown: CostBreakdown,
    /// Total API cost in USD, 6 decimals.
    pub cost: f64,
    pub charge_price: f64,
    pub profit: f64,
    /// Percent, 2 decimals.
    pub profit_margin: f64,
    /// Seconds spent in the completion call, 2 decimals.
    pub duration: f64,
    pub generated_at: DateTime<Utc>,
}
