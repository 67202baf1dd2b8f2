use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Blog post exactly as the model returned it.
///
/// `title`, `metaDescription` and `content` are required. The remaining
/// fields are optional and get defaults in [`GeneratedPost::resolve`]; a
/// value of the wrong type (`"readingTime": "5 min"`) counts as missing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPost {
    pub title: String,
    pub meta_description: String,
    pub content: String,
    /// Models occasionally emit `5.0` instead of `5`.
    #[serde(default, deserialize_with = "lenient")]
    pub reading_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub keywords: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub image_suggestions: Option<Vec<String>>,
}

/// Accept any JSON value, keeping it only if it has the expected shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

impl RawPost {
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Blog post with every field resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedPost {
    pub title: String,
    pub meta_description: String,
    pub content: String,
    pub keywords: Vec<String>,
    pub reading_time_minutes: u32,
    pub image_suggestions: Vec<String>,
}

/// Reading time at 200 words per minute, rounded up.
pub fn estimated_reading_time(length: u32) -> u32 {
    length.div_ceil(200).max(1)
}

impl GeneratedPost {
    /// Fill gaps in the model output from the request.
    ///
    /// Missing keywords fall back to the requested ones, a missing or zero
    /// reading time is estimated from the target length, and missing image
    /// suggestions become an empty list.
    pub fn resolve(raw: RawPost, requested_keywords: &[String], length: u32) -> Self {
        let reading_time_minutes = raw
            .reading_time
            .filter(|t| t.is_finite() && *t > 0.0)
            .map(|t| t.ceil() as u32)
            .unwrap_or_else(|| estimated_reading_time(length));

        Self {
            title: raw.title,
            meta_description: raw.meta_description,
            content: raw.content,
            keywords: raw
                .keywords
                .unwrap_or_else(|| requested_keywords.to_vec()),
            reading_time_minutes,
            image_suggestions: raw.image_suggestions.unwrap_or_default(),
        }
    }
}
