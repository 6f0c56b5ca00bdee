//! Shape-tolerant normalization of backend JSON into [`TrendRow`]s.
//!
//! The backend payloads are heterogeneous: some endpoints send `year` as a
//! number, some as a string, and each endpoint carries a different subset of
//! the metric columns. Normalization flattens all of that into one uniform
//! row shape with explicit optional fields.

use serde_json::Value;

use crate::domain::{SeriesField, TrendRow};

/// Convert one payload element into a [`TrendRow`].
///
/// Total over arbitrary JSON: non-object elements simply produce a row with
/// an empty year label and no metric values. The important guarantees are
///
/// - `year` is coerced to display text whatever its source type
/// - a missing or `null` metric field stays `None`, never `0.0`
pub fn normalize_row(value: &Value) -> TrendRow {
    TrendRow {
        year: period_text(value.get("year")),
        population: metric_value(value, SeriesField::Population),
        congestion: metric_value(value, SeriesField::Congestion),
        car: metric_value(value, SeriesField::Car),
    }
}

/// Coerce the period label to display text.
fn period_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        // Arrays/objects are unexpected; their compact JSON text is still a
        // usable label and keeps the function total.
        Some(other) if !other.is_null() => other.to_string(),
        _ => String::new(),
    }
}

/// Copy a metric field through if it is a number; absent/null/non-numeric
/// stays unset.
fn metric_value(value: &Value, field: SeriesField) -> Option<f64> {
    value.get(field.key()).and_then(Value::as_f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_year_is_coerced_to_text() {
        let row = normalize_row(&json!({"year": 2020, "population": 180}));
        assert_eq!(row.year, "2020");
        assert_eq!(row.population, Some(180.0));
        assert_eq!(row.congestion, None);
        assert_eq!(row.car, None);
    }

    #[test]
    fn string_year_passes_through() {
        let row = normalize_row(&json!({"year": "2020", "congestion": 42.5}));
        assert_eq!(row.year, "2020");
        assert_eq!(row.congestion, Some(42.5));
    }

    #[test]
    fn null_metric_stays_unset_not_zero() {
        let row = normalize_row(&json!({"year": "2020", "congestion": null}));
        assert_eq!(row.congestion, None);
        assert_ne!(row.congestion, Some(0.0));
    }

    #[test]
    fn missing_year_yields_empty_label() {
        let row = normalize_row(&json!({"population": 1.0}));
        assert_eq!(row.year, "");
        assert_eq!(row.population, Some(1.0));
    }

    #[test]
    fn non_object_element_is_tolerated() {
        let row = normalize_row(&json!("garbage"));
        assert_eq!(row, TrendRow::with_year(""));
    }

    #[test]
    fn combined_payload_keeps_both_fields() {
        let row = normalize_row(&json!({"year": 2019, "population": 200.0, "congestion": 30.0}));
        assert_eq!(row.population, Some(200.0));
        assert_eq!(row.congestion, Some(30.0));
        assert_eq!(row.car, None);
    }
}
