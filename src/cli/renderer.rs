use std::path::Path;

use colored::{control, Colorize};

use crate::core::formatter::{format_tokens, format_usd, strip_tags};
use crate::core::models::record::OutputRecord;

/// Render a generated post summary as a colored (or plain) string.
///
/// Layout:
/// ```text
///  Testing Without Tears
///   Topic      Testing
///   Model      openai/gpt-4o (casual, ~500 words)
///   Words      487 (3 min read)
///   Keywords   testing, tdd
///   Tokens     412 in / 1.9K out (2.3K total)
///   Cost       $0.020030
///   Charge     $1.000000
///   Profit     $0.979970 (98.00% margin)
///   Duration   12.34s
///   Images:
///     - Image 1: A green test run
///   Saved      ~/.local/share/blogsmith/dataset.jsonl
/// ```
pub fn render_record(
    record: &OutputRecord,
    saved_to: Option<&Path>,
    show_content: bool,
    use_color: bool,
) -> String {
    control::set_override(use_color);

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!(" {}", record.title).bold().to_string());

    let mut row = |label: &str, value: String| {
        lines.push(format!("  {:<10} {}", label.cyan(), value));
    };

    row("Topic", record.topic.clone());
    let model = match record.response_model.as_deref() {
        Some(served) if served != record.model => format!("{} via {}", record.model, served),
        _ => record.model.clone(),
    };
    row(
        "Model",
        format!("{} ({}, ~{} words)", model, record.tone, record.length),
    );
    row(
        "Words",
        format!("{} ({} min read)", record.word_count, record.reading_time),
    );
    if !record.keywords.is_empty() {
        row("Keywords", record.keywords.join(", "));
    }
    row(
        "Tokens",
        format!(
            "{} in / {} out ({} total)",
            format_tokens(record.usage.prompt_tokens),
            format_tokens(record.usage.completion_tokens),
            format_tokens(record.usage.total())
        ),
    );
    row("Cost", format_usd(record.cost));
    row("Charge", format_usd(record.charge_price));

    let margin = format!("{:.2}% margin", record.profit_margin);
    let margin = if record.profit >= 0.0 {
        margin.green()
    } else {
        margin.red()
    };
    row("Profit", format!("{} ({})", format_usd(record.profit), margin));
    row("Duration", format!("{:.2}s", record.duration));

    if !record.image_suggestions.is_empty() {
        lines.push(format!("  {}:", "Images".cyan()));
        for suggestion in &record.image_suggestions {
            lines.push(format!("    - {}", suggestion));
        }
    }

    if let Some(path) = saved_to {
        lines.push(format!("  {:<10} {}", "Saved".cyan(), path.display()));
    }

    if show_content {
        lines.push(String::new());
        lines.push(format!("  {}", record.meta_description.italic()));
        lines.push(String::new());
        for paragraph in strip_tags(&record.content.replace("</", "\n</")).lines() {
            let paragraph = paragraph.trim();
            if !paragraph.is_empty() {
                lines.push(format!("  {}", paragraph));
            }
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::cost::CostBreakdown;
    use crate::core::models::usage::TokenUsage;
    use chrono::Utc;

    fn record() -> OutputRecord {
        OutputRecord {
            topic: "Testing".into(),
            title: "Testing Without Tears".into(),
            meta_description: "Tests you trust.".into(),
            content: "<h2>Why</h2><p>Because bugs bite.</p>".into(),
            keywords: vec!["testing".into(), "tdd".into()],
            reading_time: 3,
            word_count: 4,
            image_suggestions: vec!["Image 1: A green test run".into()],
            tone: "casual".into(),
            length: 500,
            include_image_suggestions: true,
            seo_optimized: true,
            model: "openai/gpt-4o".into(),
            response_model: Some("openai/gpt-4o-2024-08-06".into()),
            usage: TokenUsage::new(412, 1_890),
            cost_breakdown: CostBreakdown::usd(0.00103, 0.0189),
            cost: 0.01993,
            charge_price: 1.0,
            profit: 0.98007,
            profit_margin: 98.01,
            duration: 12.34,
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn plain_summary_lines() {
        let text = render_record(&record(), None, false, false);
        assert!(text.starts_with(" Testing Without Tears"));
        assert!(text.contains(
            "Model      openai/gpt-4o via openai/gpt-4o-2024-08-06 (casual, ~500 words)"
        ));
        assert!(text.contains("Words      4 (3 min read)"));
        assert!(text.contains("Keywords   testing, tdd"));
        assert!(text.contains("Tokens     412 in / 1.9K out (2.3K total)"));
        assert!(text.contains("Cost       $0.019930"));
        assert!(text.contains("Profit     $0.980070 (98.01% margin)"));
        assert!(text.contains("Duration   12.34s"));
        assert!(text.contains("    - Image 1: A green test run"));
        assert!(!text.contains("Saved"));
        assert!(!text.contains("Because bugs bite."));
    }

    #[test]
    fn saved_path_and_content() {
        let path = Path::new("/tmp/dataset.jsonl");
        let text = render_record(&record(), Some(path), true, false);
        assert!(text.contains("Saved      /tmp/dataset.jsonl"));
        assert!(text.contains("  Tests you trust."));
        assert!(text.contains("  Why"));
        assert!(text.contains("  Because bugs bite."));
    }

    #[test]
    fn same_served_model_is_not_repeated() {
        let mut r = record();
        r.response_model = Some("openai/gpt-4o".into());
        let text = render_record(&r, None, false, false);
        assert!(!text.contains(" via "));
    }

    #[test]
    fn plain_output_has_no_ansi() {
        let text = render_record(&record(), None, false, false);
        assert!(!text.contains("\x1b["));
    }
}
