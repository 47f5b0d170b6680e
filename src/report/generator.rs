//! Fixed-width text report generation.
//!
//! Renders language shares as bars on the left and recently updated
//! repositories on the right, inside a fenced block for the README.

use crate::config::RenderConfig;
use crate::models::{LanguageShare, RecentUpdate, Report};

const FILLED: char = '█';
const EMPTY: char = '░';
const GUTTER: &str = "    ";
/// Width of `100.00%`.
const PERCENT_WIDTH: usize = 7;

/// Generate the complete fenced block written to the README.
pub fn generate_readme_block(report: &Report, config: &RenderConfig) -> String {
    let mut output = String::new();

    output.push_str("```text\n");
    output.push_str(&config.header);
    output.push_str("\n\n");

    for line in generate_rows(report, config) {
        output.push_str(&line);
        output.push('\n');
    }

    output.push_str("```\n");
    output
}

/// Zip language rows and update rows into two aligned columns.
pub fn generate_rows(report: &Report, config: &RenderConfig) -> Vec<String> {
    let languages: Vec<String> = report
        .languages
        .iter()
        .map(|share| language_row(share, config))
        .collect();
    let updates: Vec<String> = report
        .updates
        .iter()
        .map(|update| update_row(update, config))
        .collect();

    let left_width = config.name_width + 1 + config.bar_width + 1 + PERCENT_WIDTH;
    let rows = languages.len().max(updates.len());

    (0..rows)
        .map(|i| {
            let left = languages.get(i).map(String::as_str).unwrap_or("");
            let row = match updates.get(i) {
                Some(right) => {
                    let padding = left_width.saturating_sub(left.chars().count());
                    format!("{}{}{}{}", left, " ".repeat(padding), GUTTER, right)
                }
                None => left.to_string(),
            };
            row.trim_end().to_string()
        })
        .collect()
}

/// `Rust         ████████████░░░░░░░░  60.00%`
fn language_row(share: &LanguageShare, config: &RenderConfig) -> String {
    format!(
        "{:<width$} {} {:>pct$}",
        fit(&share.language, config.name_width),
        bar(share.percentage, config.bar_width),
        format_percentage(share.percentage),
        width = config.name_width,
        pct = PERCENT_WIDTH,
    )
}

/// `widget               Date: 2024-06-10 Lines of Code: +15 / -4`
fn update_row(update: &RecentUpdate, config: &RenderConfig) -> String {
    format!(
        "{:<width$} Date: {} Lines of Code: +{} / -{}",
        fit(&update.name, config.repo_width),
        update.updated_at.format("%Y-%m-%d"),
        update.additions,
        update.deletions,
        width = config.repo_width,
    )
}

/// Percentage with exactly two decimals.
pub fn format_percentage(percentage: f64) -> String {
    format!("{:.2}%", percentage)
}

/// A bar of `width` segments, `round(percentage / 100 * width)` of them filled.
pub fn bar(percentage: f64, width: usize) -> String {
    let filled = ((percentage / 100.0 * width as f64).round().max(0.0) as usize).min(width);
    let mut bar = String::with_capacity(width * FILLED.len_utf8());
    bar.extend(std::iter::repeat(FILLED).take(filled));
    bar.extend(std::iter::repeat(EMPTY).take(width - filled));
    bar
}

/// Truncate to at most `width` characters.
fn fit(text: &str, width: usize) -> String {
    text.chars().take(width).collect()
}
