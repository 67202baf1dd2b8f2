use crate::core::models::cost::CostBreakdown;
use crate::core::models::usage::TokenUsage;

/// Per-model token pricing in dollars per million tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPricing {
    pub model: &'static str,
    pub input_per_million: f64,
    pub output_per_million: f64,
}

/// All known model pricing entries.
static PRICING_TABLE: &[ModelPricing] = &[
    ModelPricing {
        model: "openai/gpt-4o",
        input_per_million: 2.50,
        output_per_million: 10.00,
    },
    ModelPricing {
        model: "anthropic/claude-3.5-sonnet",
        input_per_million: 3.00,
        output_per_million: 15.00,
    },
    ModelPricing {
        model: "google/gemini-2.0-flash-exp:free",
        input_per_million: 0.0,
        output_per_million: 0.0,
    },
];

/// Look up pricing for a model identifier. Returns None if unknown.
pub fn lookup(model: &str) -> Option<&'static ModelPricing> {
    PRICING_TABLE.iter().find(|p| p.model == model)
}

/// Pricing for `model`, or the default model's pricing when unknown.
pub fn lookup_or_default(model: &str) -> &'static ModelPricing {
    // First entry is the default model.
    lookup(model).unwrap_or(&PRICING_TABLE[0])
}

/// Every priced model, default first.
pub fn all() -> &'static [ModelPricing] {
    PRICING_TABLE
}

/// Identifiers of every priced model.
pub fn known_models() -> impl Iterator<Item = &'static str> {
    PRICING_TABLE.iter().map(|p| p.model)
}

/// Estimate the cost of a completion.
pub fn calculate_cost(usage: &TokenUsage, model: &str) -> CostBreakdown {
    let pricing = lookup_or_default(model);
    let input_cost = usage.prompt_tokens as f64 / 1_000_000.0 * pricing.input_per_million;
    let output_cost = usage.completion_tokens as f64 / 1_000_000.0 * pricing.output_per_million;
    CostBreakdown::usd(input_cost, output_cost)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::request::DEFAULT_MODEL;

    #[test]
    fn default_entry_is_default_model() {
        assert_eq!(PRICING_TABLE[0].model, DEFAULT_MODEL);
    }

    #[test]
    fn lookup_known_model() {
        let p = lookup("anthropic/claude-3.5-sonnet").unwrap();
        assert!((p.input_per_million - 3.0).abs() < 1e-12);
        assert!((p.output_per_million - 15.0).abs() < 1e-12);
    }

    #[test]
    fn lookup_unknown_returns_none() {
        assert!(lookup("mistralai/mixtral-8x7b").is_none());
    }

    #[test]
    fn lookup_is_exact() {
        assert!(lookup("OPENAI/GPT-4O").is_none());
        assert!(lookup("google/gemini-2.0-flash-exp").is_none());
    }

    #[test]
    fn calculate_cost_gpt4o() {
        let usage = TokenUsage::new(1_000_000, 100_000);
        let cost = calculate_cost(&usage, "openai/gpt-4o");
        assert!((cost.input_cost - 2.5).abs() < 1e-9);
        assert!((cost.output_cost - 1.0).abs() < 1e-9);
        assert!((cost.total_cost - 3.5).abs() < 1e-9);
    }

    #[test]
    fn calculate_cost_small_usage() {
        let usage = TokenUsage::new(1_500, 2_000);
        let cost = calculate_cost(&usage, "anthropic/claude-3.5-sonnet");
        assert!((cost.input_cost - 0.0045).abs() < 1e-12); // 1.5K * 3 / 1M
        assert!((cost.output_cost - 0.03).abs() < 1e-12); // 2K * 15 / 1M
    }

    #[test]
    fn zero_usage_is_free_for_every_model() {
        let usage = TokenUsage::new(0, 0);
        for model in known_models().chain(["unknown/model"]) {
            assert_eq!(calculate_cost(&usage, model).total_cost, 0.0, "{}", model);
        }
    }

    #[test]
    fn free_model_costs_nothing() {
        let usage = TokenUsage::new(100, 200);
        let cost = calculate_cost(&usage, "google/gemini-2.0-flash-exp:free");
        assert_eq!(cost.total_cost, 0.0);
    }

    #[test]
    fn unknown_model_uses_default_pricing() {
        let usage = TokenUsage::new(12_345, 6_789);
        let unknown = calculate_cost(&usage, "meta-llama/llama-3-70b");
        let default = calculate_cost(&usage, DEFAULT_MODEL);
        assert_eq!(unknown, default);
    }
}
