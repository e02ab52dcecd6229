//! Notification texts and the per-cycle console table.

use chrono::NaiveTime;

use crate::models::analysis::{AnalysisResult, DipAlert};

pub const MISSING: &str = "N/A";

const TABLE_HEADERS: [&str; 5] = ["Symbol", "Short-Term Signal", "Long-Term Signal", "PE Ratio", "EPS"];

/// Two-decimal rendering of an optional metric.
pub fn fmt_metric(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}", v),
        _ => MISSING.to_string(),
    }
}

/// `15` -> `3PM`.
pub fn hour_label(hour: u32) -> String {
    NaiveTime::from_hms_opt(hour, 0, 0)
        .map(|t| t.format("%-I%p").to_string())
        .unwrap_or_else(|| format!("{}:00", hour))
}

pub fn buy_candidate_message(result: &AnalysisResult) -> String {
    format!(
        "📢 Alert: {} is a strong buy candidate!\n\n🧾 Details:\n• Short-Term: {}\n• Long-Term: {}\n• PE Ratio: {}\n• EPS: {}",
        result.symbol,
        result.short_term,
        result.long_term,
        fmt_metric(result.pe_ratio),
        fmt_metric(result.eps),
    )
}

pub fn dip_message(result: &AnalysisResult, alert: &DipAlert) -> String {
    format!(
        "{}\n\n🧾 Details:\n• PE Ratio: {}\n• EPS: {}",
        alert.message,
        fmt_metric(result.pe_ratio),
        fmt_metric(result.eps),
    )
}

/// Daily summary of the cycle's top picks, with one detail line per pick.
pub fn summary_message(top_picks: &[&AnalysisResult], hour: u32) -> String {
    let label = hour_label(hour);
    if top_picks.is_empty() {
        return format!("⏰ {} Market Open: No strong buy picks right now.", label);
    }

    let mut msg = format!("⏰ {} Top Picks:\n", label);
    for pick in top_picks {
        msg.push_str(&format!("✅ {}\n", pick.symbol));
    }
    msg.push_str("\n🧾 Details:");
    for pick in top_picks {
        msg.push_str(&format!(
            "\n• {}: {} | {} | PE {} | EPS {}",
            pick.symbol,
            pick.short_term,
            pick.long_term,
            fmt_metric(pick.pe_ratio),
            fmt_metric(pick.eps),
        ));
    }
    msg
}

/// Fixed-width table of watchlist results.
pub fn render_table(results: &[AnalysisResult]) -> String {
    let rows: Vec<[String; 5]> = results
        .iter()
        .map(|r| {
            [
                r.symbol.clone(),
                r.short_term.to_string(),
                r.long_term.to_string(),
                fmt_metric(r.pe_ratio),
                fmt_metric(r.eps),
            ]
        })
        .collect();

    let mut widths = TABLE_HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    out.push_str("---------------------\n");
    out.push_str("Your Watchlist Analysis\n");
    out.push_str("---------------------\n");
    out.push_str(&render_row(&TABLE_HEADERS.map(str::to_string), &widths));
    if rows.is_empty() {
        out.push_str("(no results this cycle)\n");
    }
    for row in &rows {
        out.push_str(&render_row(row, &widths));
    }
    out
}

fn render_row(cells: &[String; 5], widths: &[usize; 5]) -> String {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths.iter()).enumerate() {
        let pad = width.saturating_sub(cell.chars().count());
        // Numeric columns are right-aligned.
        if i >= 3 {
            line.push_str(&" ".repeat(pad));
            line.push_str(cell);
        } else {
            line.push_str(cell);
            line.push_str(&" ".repeat(pad));
        }
        if i + 1 < cells.len() {
            line.push_str("  ");
        }
    }
    line.truncate(line.trim_end().len());
    line.push('\n');
    line
}
