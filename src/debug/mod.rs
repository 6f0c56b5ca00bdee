//! Debug bundle writer for inspecting the trends view offline.
//!
//! Bound to the `d` key on the trends page: dumps the active selection, the
//! load state, and the normalized rows into a timestamped markdown file under
//! `debug/`.

use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

use crate::domain::LoadState;
use crate::error::AppError;
use crate::tui::trends::TrendsView;

pub fn write_debug_bundle(view: &TrendsView) -> Result<PathBuf, AppError> {
    let dir = PathBuf::from("debug");
    create_dir_all(&dir).map_err(|e| AppError::new(4, format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let metric = format!("{:?}", view.active()).to_lowercase();
    let path = dir.join(format!("cbd_debug_{metric}_{ts}.md"));

    let mut file = File::create(&path)
        .map_err(|e| AppError::new(4, format!("Failed to create debug file: {e}")))?;

    let w = |e: std::io::Error| AppError::new(4, format!("Failed to write debug: {e}"));

    writeln!(file, "# cbd debug bundle").map_err(w)?;
    writeln!(file, "- generated: {}", Local::now().to_rfc3339()).map_err(w)?;
    writeln!(file, "- metric: {} ({})", view.active().tab_label(), view.active().endpoint_path())
        .map_err(w)?;
    writeln!(file, "- title: {}", view.title()).map_err(w)?;
    writeln!(file, "- range: {}", view.range_label()).map_err(w)?;

    match view.state() {
        LoadState::Loading => {
            writeln!(file, "- state: loading").map_err(w)?;
        }
        LoadState::Error(message) => {
            writeln!(file, "- state: error").map_err(w)?;
            writeln!(file, "- message: {message}").map_err(w)?;
        }
        LoadState::Success(rows) => {
            writeln!(file, "- state: success ({} rows)", rows.len()).map_err(w)?;
            writeln!(file, "\n## Rows").map_err(w)?;
            writeln!(file, "| year | population | congestion | car |").map_err(w)?;
            writeln!(file, "| - | - | - | - |").map_err(w)?;
            for row in rows {
                writeln!(
                    file,
                    "| {} | {} | {} | {} |",
                    row.year,
                    fmt_opt(row.population),
                    fmt_opt(row.congestion),
                    fmt_opt(row.car)
                )
                .map_err(w)?;
            }
        }
    }

    Ok(path)
}

fn fmt_opt(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{v:.1}"),
        _ => "-".to_string(),
    }
}
