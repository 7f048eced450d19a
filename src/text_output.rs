//! Human-readable table output

use crate::analysis::ParetoAnalysis;
use crate::docx_output::summary_lines;

/// Render the ranked table followed by the summary
pub fn render_table(analysis: &ParetoAnalysis, title: &str) -> String {
    let name_width = analysis
        .rows()
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("Cause".len());

    let mut out = String::new();
    out.push_str(&format!("=== {} ===\n", title));
    out.push_str(&format!(
        "  {:<width$}  {:>12}  {:>8}  {:>8}\n",
        "Cause",
        "Occurrence",
        "%",
        "% Cum",
        width = name_width
    ));
    out.push_str(&format!("{}\n", "─".repeat(name_width + 38)));

    for (index, row) in analysis.rows().iter().enumerate() {
        let marker = if analysis.is_top(index) { '*' } else { ' ' };
        out.push_str(&format!(
            "{} {:<width$}  {:>12.3}  {:>7.2}%  {:>7.2}%\n",
            marker,
            row.name,
            row.occurrence,
            row.share * 100.0,
            row.cumulative_share * 100.0,
            width = name_width
        ));
    }

    out.push('\n');
    out.push_str(&render_summary(analysis));
    out
}

/// Summary block: cause count, top-cause count and coverage
pub fn render_summary(analysis: &ParetoAnalysis) -> String {
    let mut out = String::new();
    for line in summary_lines(&analysis.summary()) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Top causes only, one per line
pub fn render_top(analysis: &ParetoAnalysis) -> String {
    analysis
        .top_rows()
        .iter()
        .enumerate()
        .map(|(i, row)| {
            format!(
                "{}. {} ({} occurrences, cumulative {:.1}%)\n",
                i + 1,
                row.name,
                row.occurrence,
                row.cumulative_share * 100.0
            )
        })
        .collect()
}
