use serde::Deserialize;

pub const DEFAULT_TONE: &str = "professional";
pub const DEFAULT_LENGTH: u32 = 1000;
pub const DEFAULT_MODEL: &str = "openai/gpt-4o";

/// An OpenRouter API key. Never printed in full.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_blank() {
            write!(f, "Credential(<empty>)")
        } else {
            write!(f, "Credential(<redacted>)")
        }
    }
}

/// Everything needed to produce one blog post.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub topic: String,
    pub keywords: Vec<String>,
    pub tone: String,
    /// Target word count, passed to the model as a hint only.
    pub length: u32,
    pub include_image_suggestions: bool,
    pub seo_optimized: bool,
    pub model: String,
    pub credential: Credential,
}

impl GenerationRequest {
    /// Request with every optional field at its default.
    pub fn new(topic: impl Into<String>, credential: Credential) -> Self {
        Self {
            topic: topic.into(),
            keywords: Vec::new(),
            tone: DEFAULT_TONE.to_string(),
            length: DEFAULT_LENGTH,
            include_image_suggestions: true,
            seo_optimized: true,
            model: DEFAULT_MODEL.to_string(),
            credential,
        }
    }
}

/// Raw generation input as accepted from a JSON input file.
///
/// Every field is optional here; missing values are filled from CLI flags,
/// the config file, and finally the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationInput {
    pub topic: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub tone: Option<String>,
    pub length: Option<u32>,
    pub include_image_suggestions: Option<bool>,
    pub seo_optimized: Option<bool>,
    pub model: Option<String>,
    pub openrouter_api_key: Option<String>,
}

impl GenerationInput {
    /// Load an input file. Keys follow the camelCase input schema.
    pub fn from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        use anyhow::Context;
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse input file {}", path.display()))
    }

    /// Fill unset fields from `fallback`, keeping values already present.
    pub fn or(self, fallback: GenerationInput) -> Self {
        Self {
            topic: self.topic.or(fallback.topic),
            keywords: self.keywords.or(fallback.keywords),
            tone: self.tone.or(fallback.tone),
            length: self.length.or(fallback.length),
            include_image_suggestions: self
                .include_image_suggestions
                .or(fallback.include_image_suggestions),
            seo_optimized: self.seo_optimized.or(fallback.seo_optimized),
            model: self.model.or(fallback.model),
            openrouter_api_key: self.openrouter_api_key.or(fallback.openrouter_api_key),
        }
    }

    /// Resolve into a request, applying built-in defaults.
    ///
    /// Missing topic or key resolve to empty strings; the generator rejects
    /// them before any network traffic.
    pub fn into_request(self) -> GenerationRequest {
        let defaults = GenerationRequest::new(
            self.topic.unwrap_or_default(),
            Credential::new(self.openrouter_api_key.unwrap_or_default()),
        );
        GenerationRequest {
            keywords: self
                .keywords
                .unwrap_or_default()
                .into_iter()
                .map(|k| k.trim().to_string())
                .filter(|k| !k.is_empty())
                .collect(),
            tone: self.tone.unwrap_or(defaults.tone),
            length: self.length.filter(|l| *l > 0).unwrap_or(defaults.length),
            include_image_suggestions: self
                .include_image_suggestions
                .unwrap_or(defaults.include_image_suggestions),
            seo_optimized: self.seo_optimized.unwrap_or(defaults.seo_optimized),
            model: self.model.unwrap_or(defaults.model),
            ..defaults
        }
    }
}
