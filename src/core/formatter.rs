/// Round `value` to `places` decimal places.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Remove `<...>` markup tags. An unterminated `<` is kept as text.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        match rest[open..].find('>') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Count whitespace-separated words in HTML content, ignoring tags.
pub fn count_words(html: &str) -> usize {
    strip_tags(html).split_whitespace().count()
}

/// Returns "$0.012345" with six decimals, matching record precision.
pub fn format_usd(amount: f64) -> String {
    format!("${:.6}", amount)
}

/// Returns "1.2K" / "3.4M" style token counts.
pub fn format_tokens(count: u64) -> String {
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        format!("{}", count)
    }
}
