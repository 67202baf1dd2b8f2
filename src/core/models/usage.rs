use serde::{Deserialize, Serialize};

/// Token counts reported by the completion API for a single request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_tokens: Option<u64>,
}

impl TokenUsage {
    #[cfg(test)]
    pub fn new(prompt_tokens: u64, completion_tokens: u64) -> Self {
        Self {
            prompt_tokens,
            completion_tokens,
            total_tokens: None,
        }
    }

    /// Total as reported by the API, or the sum of both counts.
    pub fn total(&self) -> u64 {
        self.total_tokens
            .unwrap_or(self.prompt_tokens + self.completion_tokens)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_openrouter_usage() {
        let json = r#"{ "prompt_tokens": 120, "completion_tokens": 840, "total_tokens": 960 }"#;
        let usage: TokenUsage = serde_json::from_str(json).unwrap();
        assert_eq!(usage.prompt_tokens, 120);
        assert_eq!(usage.completion_tokens, 840);
        assert_eq!(usage.total(), 960);
    }

    #[test]
    fn total_falls_back_to_sum() {
        let usage = TokenUsage::new(100, 200);
        assert_eq!(usage.total(), 300);
    }

    #[test]
    fn serialize_omits_missing_total() {
        let json = serde_json::to_string(&TokenUsage::new(1, 2)).unwrap();
        assert_eq!(json, r#"{"prompt_tokens":1,"completion_tokens":2}"#);
    }
}
