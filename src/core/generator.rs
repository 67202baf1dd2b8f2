use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};

use crate::core::completion::{CompletionClient, CompletionError};
use crate::core::cost::pricing::calculate_cost;
use crate::core::formatter::{count_words, round_to};
use crate::core::models::post::{GeneratedPost, RawPost};
use crate::core::models::record::OutputRecord;
use crate::core::models::request::GenerationRequest;
use crate::core::prompt::build_prompt;
use crate::core::providers::openrouter::KEYS_URL;
use crate::core::providers::transport::Transport;
use crate::core::sink::OutputSink;

/// Flat price charged per generated post, in USD.
pub const DEFAULT_CHARGE_PRICE: f64 = 1.00;

const MONEY_PLACES: i32 = 6;
const PERCENT_PLACES: i32 = 2;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error("Generated content is not a valid blog post: {0}")]
    ContentShape(#[source] serde_json::Error),
    #[error("Failed to write output record: {0}")]
    Sink(#[source] std::io::Error),
}

/// Reject requests that cannot be sent.
pub fn validate(request: &GenerationRequest) -> Result<(), GenerateError> {
    if request.topic.trim().is_empty() {
        return Err(GenerateError::Validation("Topic is required".to_string()));
    }
    if request.credential.is_blank() {
        return Err(GenerateError::Validation(format!(
            "OpenRouter API key is required \
             (pass --api-key or set OPENROUTER_API_KEY; get one at {})",
            KEYS_URL
        )));
    }
    Ok(())
}

/// Profit and margin (percent) for a post sold at `charge_price`.
pub fn profit(charge_price: f64, total_cost: f64) -> (f64, f64) {
    let profit = charge_price - total_cost;
    let margin = if charge_price > 0.0 {
        profit / charge_price * 100.0
    } else {
        0.0
    };
    (profit, margin)
}

/// Generate one blog post and hand the finished record to `sink`.
///
/// Nothing reaches the sink unless every step succeeds.
pub async fn generate<T, S>(
    request: &GenerationRequest,
    client: &CompletionClient<T>,
    sink: &mut S,
    charge_price: f64,
) -> Result<OutputRecord, GenerateError>
where
    T: Transport,
    S: OutputSink,
{
    validate(request)?;
    info!("Input: {:?}", request);
    info!(
        "Generating blog post about: \"{}\" with {}",
        request.topic, request.model
    );
    info!(
        "Target length: {} words, Tone: {}",
        request.length, request.tone
    );

    let prompt = build_prompt(request);
    debug!("Prompt is {} characters", prompt.len());

    let started = tokio::time::Instant::now();
    let completion = client
        .complete(&prompt, &request.model, &request.credential)
        .await?;
    let duration = round_to(started.elapsed().as_secs_f64(), 2);

    info!("API call completed in {:.2}s", duration);
    info!(
        "Tokens used - Input: {}, Output: {}",
        completion.usage.prompt_tokens, completion.usage.completion_tokens
    );

    let raw = RawPost::parse(&completion.text).map_err(GenerateError::ContentShape)?;
    let post = GeneratedPost::resolve(raw, &request.keywords, request.length);

    let cost = calculate_cost(&completion.usage, &request.model);
    let (profit, margin) = profit(charge_price, cost.total_cost);

    let record = OutputRecord {
        topic: request.topic.clone(),
        word_count: count_words(&post.content),
        title: post.title,
        meta_description: post.meta_description,
        content: post.content,
        keywords: post.keywords,
        reading_time: post.reading_time_minutes,
        image_suggestions: post.image_suggestions,
        tone: request.tone.clone(),
        length: request.length,
        include_image_suggestions: request.include_image_suggestions,
        seo_optimized: request.seo_optimized,
        model: request.model.clone(),
        response_model: completion.model,
        usage: completion.usage,
        cost: round_to(cost.total_cost, MONEY_PLACES),
        cost_breakdown: cost.rounded(MONEY_PLACES),
        charge_price,
        profit: round_to(profit, MONEY_PLACES),
        profit_margin: round_to(margin, PERCENT_PLACES),
        duration,
        generated_at: Utc::now(),
    };

    sink.push(&record).map_err(GenerateError::Sink)?;

    info!("Blog post generated successfully");
    info!("  Title: {}", record.title);
    info!("  Word Count: {}", record.word_count);
    info!("  Cost: ${}", record.cost);
    info!("  Charge: ${}", record.charge_price);
    info!(
        "  Profit: ${} ({}% margin)",
        record.profit, record.profit_margin
    );

    Ok(record)
}
