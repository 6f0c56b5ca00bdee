//! Table/summary formatting for `cbd trends` and `cbd eco`.

use crate::data::eco::{EmissionRow, ModalShareRow, MODAL_SHARE_SERIES};
use crate::domain::{Metric, TrendRow};
use crate::tui::trends::TrendsView;

/// Header block for a fetched trends run (metric, endpoint, derived labels).
pub fn format_trend_summary(view: &TrendsView) -> String {
    let mut out = String::new();

    out.push_str("=== cbd - Historical Trends ===\n");
    out.push_str(&format!("Metric: {}\n", view.active().tab_label()));
    out.push_str(&format!("Endpoint: {}\n", view.active().endpoint_path()));
    out.push_str(&format!("Title: {}\n", view.title()));
    out.push_str(&format!("Range: {}\n", view.range_label()));
    if let Some(rows) = view.state().rows() {
        out.push_str(&format!("Rows: n={}\n", rows.len()));
    }
    out.push('\n');

    out
}

/// Fixed-width row table for one metric.
///
/// Only the columns the metric plots are shown. Absent values print `-`,
/// never `0`.
pub fn format_trend_table(metric: Metric, rows: &[TrendRow]) -> String {
    let fields = metric.fields();
    let mut out = String::new();

    out.push_str(&format!("{:<8}", "year"));
    for field in fields {
        out.push_str(&format!(" {:>24}", field.label()));
    }
    out.push('\n');

    out.push_str(&format!("{:-<8}", ""));
    for _ in fields {
        out.push_str(&format!(" {:-<24}", ""));
    }
    out.push('\n');

    for row in rows {
        out.push_str(&format!("{:<8}", truncate(&row.year, 8)));
        for field in fields {
            out.push_str(&format!(" {:>24}", fmt_opt(field.get(row))));
        }
        out.push('\n');
    }

    out
}

/// Per-km CO₂ emission table (static dataset).
pub fn format_emission_table(rows: &[EmissionRow]) -> String {
    let mut out = String::new();
    out.push_str("Estimated CO₂ emissions by transport mode (g / km / person):\n\n");
    out.push_str(&format!("{:<14} {:>8}\n", "mode", "co2"));
    out.push_str(&format!("{:-<14} {:-<8}\n", "", ""));
    for row in rows {
        out.push_str(&format!("{:<14} {:>8}\n", row.mode, row.co2));
    }
    out
}

/// Modal-share table, one column per mode (static dataset).
pub fn format_modal_share_table(rows: &[ModalShareRow]) -> String {
    let mut out = String::new();
    out.push_str("Transport mode share in the CBD (%):\n\n");

    out.push_str(&format!("{:<6}", "year"));
    for &(name, _) in MODAL_SHARE_SERIES {
        out.push_str(&format!(" {:>8}", name));
    }
    out.push('\n');

    out.push_str(&format!("{:-<6}", ""));
    for _ in MODAL_SHARE_SERIES {
        out.push_str(&format!(" {:-<8}", ""));
    }
    out.push('\n');

    for row in rows {
        out.push_str(&format!("{:<6}", row.year));
        for &(_, get) in MODAL_SHARE_SERIES {
            out.push_str(&format!(" {:>8.0}", get(row)));
        }
        out.push('\n');
    }

    out
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.1}"),
        _ => "-".to_string(),
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}
