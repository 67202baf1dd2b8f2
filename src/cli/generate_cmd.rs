use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::warn;

use crate::cli::output::{OutputFormat, OutputOptions};
use crate::cli::renderer;
use crate::core::completion::CompletionClient;
use crate::core::config::AppConfig;
use crate::core::generator;
use crate::core::models::record::OutputRecord;
use crate::core::models::request::{GenerationInput, GenerationRequest};
use crate::core::providers::openrouter::OpenRouterTransport;
use crate::core::sink::JsonlSink;

pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

#[derive(clap::Args, Debug, Default)]
pub struct GenerateArgs {
    /// Topic of the blog post
    pub topic: Option<String>,

    /// Target SEO keyword (repeatable, or comma-separated)
    #[arg(short, long = "keyword", value_delimiter = ',')]
    pub keywords: Vec<String>,

    /// Writing tone, e.g. professional, casual, witty
    #[arg(short, long)]
    pub tone: Option<String>,

    /// Approximate length in words
    #[arg(short, long)]
    pub length: Option<u32>,

    /// Do not ask for image suggestions
    #[arg(long)]
    pub no_images: bool,

    /// Do not emphasise SEO keyword usage and heading structure
    #[arg(long)]
    pub no_seo: bool,

    /// OpenRouter model identifier
    #[arg(short, long)]
    pub model: Option<String>,

    /// OpenRouter API key (defaults to $OPENROUTER_API_KEY)
    #[arg(long)]
    pub api_key: Option<String>,

    /// JSON input file with topic, keywords, tone, length, ...
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Dataset file to append the record to
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Do not append the record to the dataset
    #[arg(long, conflicts_with = "output")]
    pub no_save: bool,

    /// Price charged per post in USD
    #[arg(long)]
    pub charge_price: Option<f64>,
}

impl GenerateArgs {
    fn as_input(&self) -> GenerationInput {
        GenerationInput {
            topic: self.topic.clone(),
            keywords: (!self.keywords.is_empty()).then(|| self.keywords.clone()),
            tone: self.tone.clone(),
            length: self.length,
            include_image_suggestions: self.no_images.then_some(false),
            seo_optimized: self.no_seo.then_some(false),
            model: self.model.clone(),
            openrouter_api_key: self.api_key.clone(),
        }
    }
}

/// Merge flags, input file, environment and config into one request.
///
/// Precedence, highest first: flags, input file, `OPENROUTER_API_KEY`
/// (key only), config file.
pub fn resolve_request(
    args: &GenerateArgs,
    file: GenerationInput,
    env_key: Option<String>,
    config: &AppConfig,
) -> GenerationRequest {
    let api_key = env_key
        .filter(|k| !k.trim().is_empty())
        .or_else(|| config.api.api_key.clone());
    args.as_input()
        .or(file)
        .or(config.generation.as_input(api_key))
        .into_request()
}

fn load_config() -> Result<AppConfig> {
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            warn!("{}; using defaults", e);
            AppConfig::default()
        }
    };

    let issues = config.validate();
    if !issues.is_empty() {
        anyhow::bail!(
            "Invalid config at {}:\n  - {}",
            AppConfig::config_path().display(),
            issues.join("\n  - ")
        );
    }
    for warning in config.warnings() {
        warn!("{}", warning);
    }
    Ok(config)
}

pub async fn run(args: GenerateArgs, opts: &OutputOptions) -> Result<()> {
    let config = load_config()?;

    let file_input = match &args.input {
        Some(path) => GenerationInput::from_file(path)?,
        None => GenerationInput::default(),
    };
    let request = resolve_request(&args, file_input, std::env::var(API_KEY_ENV).ok(), &config);

    let charge_price = args.charge_price.unwrap_or(config.generation.charge_price);
    if !charge_price.is_finite() || charge_price <= 0.0 {
        anyhow::bail!("Charge price must be positive, got {}", charge_price);
    }

    let transport = OpenRouterTransport::new(
        config.api.endpoint.clone(),
        config.api.identity(),
        Duration::from_secs(config.api.timeout_secs),
    )
    .context("Failed to set up OpenRouter client")?;
    let client = CompletionClient::new(transport).max_attempts(config.api.max_attempts);

    let (record, saved_to) = if args.no_save {
        let mut discard: Vec<OutputRecord> = Vec::new();
        let record = generator::generate(&request, &client, &mut discard, charge_price).await?;
        (record, None)
    } else {
        let mut sink = JsonlSink::new(args.output.clone().unwrap_or_else(JsonlSink::default_path));
        let record = generator::generate(&request, &client, &mut sink, charge_price).await?;
        (record, Some(sink.path().to_path_buf()))
    };

    match opts.format {
        OutputFormat::Text => {
            println!(
                "{}",
                renderer::render_record(&record, saved_to.as_deref(), opts.verbose, opts.use_color)
            );
        }
        OutputFormat::Json => {
            println!("{}", opts.to_json(&record)?);
        }
    }

    Ok(())
}
