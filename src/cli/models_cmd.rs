use anyhow::Result;
use colored::{control, Colorize};
use serde::Serialize;

use crate::cli::output::{OutputFormat, OutputOptions};
use crate::core::cost::pricing::{self, ModelPricing};
use crate::core::models::request::DEFAULT_MODEL;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ModelRow {
    model: &'static str,
    input_price_per_million_tokens: f64,
    output_price_per_million_tokens: f64,
    default: bool,
}

impl From<&ModelPricing> for ModelRow {
    fn from(p: &ModelPricing) -> Self {
        Self {
            model: p.model,
            input_price_per_million_tokens: p.input_per_million,
            output_price_per_million_tokens: p.output_per_million,
            default: p.model == DEFAULT_MODEL,
        }
    }
}

fn render_rows(rows: &[ModelRow], use_color: bool) -> String {
    control::set_override(use_color);
    let mut lines = vec![format!(
        " {:<36} {:>10} {:>10}",
        "Model".bold(),
        "Input/1M",
        "Output/1M"
    )];
    for row in rows {
        let marker = if row.default { " (default)" } else { "" };
        lines.push(format!(
            " {:<36} {:>10} {:>10}{}",
            row.model,
            format!("${:.2}", row.input_price_per_million_tokens),
            format!("${:.2}", row.output_price_per_million_tokens),
            marker.dimmed()
        ));
    }
    lines.join("\n")
}

/// List models with known pricing. Unknown models are billed at default rates.
pub fn run(opts: &OutputOptions) -> Result<()> {
    let rows: Vec<ModelRow> = pricing::all().iter().map(ModelRow::from).collect();
    match opts.format {
        OutputFormat::Text => println!("{}", render_rows(&rows, opts.use_color)),
        OutputFormat::Json => println!("{}", opts.to_json(&rows)?),
    }
    Ok(())
}
