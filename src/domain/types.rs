//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory by the TUI views
//! - printed as tables by the scripting subcommands
//! - written into debug bundles for offline inspection

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The data series shown on the trends page.
///
/// Each metric maps to one backend endpoint and one chart variant. The set is
/// fixed; selection only changes through user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Car ownership per 100 households.
    Car,
    /// Congestion index.
    Congestion,
    /// CBD population (×10k).
    Population,
    /// Population and congestion overlaid on one chart.
    Combined,
}

impl Metric {
    /// Tab order on the trends page.
    pub const ALL: [Metric; 4] = [
        Metric::Car,
        Metric::Congestion,
        Metric::Population,
        Metric::Combined,
    ];

    /// Short label used on the tab bar.
    pub fn tab_label(self) -> &'static str {
        match self {
            Metric::Car => "Car Ownership",
            Metric::Congestion => "Congestion",
            Metric::Population => "Population",
            Metric::Combined => "Population vs Congestion",
        }
    }

    /// Chart title shown above the plot area.
    pub fn title(self) -> &'static str {
        match self {
            Metric::Car => "Car Ownership (per 100 Households)",
            Metric::Congestion => "Congestion Index",
            Metric::Population => "Melbourne CBD Population (×10k)",
            Metric::Combined => "Population vs Congestion",
        }
    }

    /// Request path on the trends API.
    pub fn endpoint_path(self) -> &'static str {
        match self {
            Metric::Car => "/api/trends/car-ownership",
            Metric::Congestion => "/api/trends/congestion",
            Metric::Population => "/api/trends/population",
            Metric::Combined => "/api/trends/combined",
        }
    }

    /// Which row fields this metric plots, in draw order.
    pub fn fields(self) -> &'static [SeriesField] {
        match self {
            Metric::Car => &[SeriesField::Car],
            Metric::Congestion => &[SeriesField::Congestion],
            Metric::Population => &[SeriesField::Population],
            Metric::Combined => &[SeriesField::Population, SeriesField::Congestion],
        }
    }

    pub fn next(self) -> Metric {
        match self {
            Metric::Car => Metric::Congestion,
            Metric::Congestion => Metric::Population,
            Metric::Population => Metric::Combined,
            Metric::Combined => Metric::Car,
        }
    }

    pub fn prev(self) -> Metric {
        match self {
            Metric::Car => Metric::Combined,
            Metric::Congestion => Metric::Car,
            Metric::Population => Metric::Congestion,
            Metric::Combined => Metric::Population,
        }
    }
}

/// One numeric column of a [`TrendRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesField {
    Population,
    Congestion,
    Car,
}

impl SeriesField {
    /// Legend/series name (matches the original dashboard labels).
    pub fn label(self) -> &'static str {
        match self {
            SeriesField::Population => "Population (×10k)",
            SeriesField::Congestion => "Congestion",
            SeriesField::Car => "Car Ownership",
        }
    }

    /// JSON key in the backend payload.
    pub fn key(self) -> &'static str {
        match self {
            SeriesField::Population => "population",
            SeriesField::Congestion => "congestion",
            SeriesField::Car => "car",
        }
    }

    pub fn get(self, row: &TrendRow) -> Option<f64> {
        match self {
            SeriesField::Population => row.population,
            SeriesField::Congestion => row.congestion,
            SeriesField::Car => row.car,
        }
    }
}

/// One time-period's worth of metric values, keyed by a year label.
///
/// The year label is always present as display text (coerced from whatever
/// type the backend sent). Metric fields are optional: `None` means the
/// backend did not report a value for that period, which is deliberately
/// distinct from `Some(0.0)` so no false zero ever gets plotted.
///
/// Rows keep the order in which they were received; callers must not assume
/// they are sorted by year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRow {
    pub year: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub congestion: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub car: Option<f64>,
}

impl TrendRow {
    /// A row with only a year label set.
    pub fn with_year(year: impl Into<String>) -> Self {
        Self {
            year: year.into(),
            population: None,
            congestion: None,
            car: None,
        }
    }
}

/// Lifecycle of the current fetch for a trends view.
///
/// Exactly one variant holds at any time; transitions happen only in response
/// to the fetch lifecycle tied to the currently selected metric.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Loading,
    Success(Vec<TrendRow>),
    Error(String),
}

impl LoadState {
    pub fn rows(&self) -> Option<&[TrendRow]> {
        match self {
            LoadState::Success(rows) => Some(rows),
            _ => None,
        }
    }
}

/// Tabs on the eco-insights page (static datasets, no fetch involved).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum EcoTab {
    /// Per-km CO₂ emissions by transport mode.
    Co2,
    /// 2014–2024 modal share in the CBD.
    Mode,
}

impl EcoTab {
    pub fn tab_label(self) -> &'static str {
        match self {
            EcoTab::Co2 => "Estimated CO2 Emissions",
            EcoTab::Mode => "Transport Mode Comparisons",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            EcoTab::Co2 => "Estimated CO₂ Emissions by Transport Mode (g / km / person)",
            EcoTab::Mode => "Transport Mode Share in the CBD (%)",
        }
    }

    /// Small caption shown next to the title (mirrors the web layout).
    pub fn range_note(self) -> &'static str {
        match self {
            EcoTab::Co2 => "Per-km emissions",
            EcoTab::Mode => "2014–2024",
        }
    }

    pub fn toggle(self) -> EcoTab {
        match self {
            EcoTab::Co2 => EcoTab::Mode,
            EcoTab::Mode => EcoTab::Co2,
        }
    }
}

/// Pages of the dashboard, mirroring the web navigation surface
/// (`/`, `/map`, `/trends`, `/eco-insights`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Map,
    Trends,
    EcoInsights,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Home, Page::Map, Page::Trends, Page::EcoInsights];

    pub fn tab_label(self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Map => "Map",
            Page::Trends => "Trends",
            Page::EcoInsights => "Eco Insights",
        }
    }

    pub fn next(self) -> Page {
        match self {
            Page::Home => Page::Map,
            Page::Map => Page::Trends,
            Page::Trends => Page::EcoInsights,
            Page::EcoInsights => Page::Home,
        }
    }

    pub fn prev(self) -> Page {
        match self {
            Page::Home => Page::EcoInsights,
            Page::Map => Page::Home,
            Page::Trends => Page::Map,
            Page::EcoInsights => Page::Trends,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metric_endpoint_mapping_is_fixed() {
        assert_eq!(Metric::Population.endpoint_path(), "/api/trends/population");
        assert_eq!(Metric::Congestion.endpoint_path(), "/api/trends/congestion");
        assert_eq!(Metric::Car.endpoint_path(), "/api/trends/car-ownership");
        assert_eq!(Metric::Combined.endpoint_path(), "/api/trends/combined");
    }

    #[test]
    fn metric_titles_match_dashboard_copy() {
        assert_eq!(Metric::Car.title(), "Car Ownership (per 100 Households)");
        assert_eq!(Metric::Congestion.title(), "Congestion Index");
        assert_eq!(Metric::Population.title(), "Melbourne CBD Population (×10k)");
        assert_eq!(Metric::Combined.title(), "Population vs Congestion");
    }

    #[test]
    fn metric_cycle_is_closed() {
        for m in Metric::ALL {
            assert_eq!(m.next().prev(), m);
            assert_eq!(m.prev().next(), m);
        }
    }

    #[test]
    fn combined_plots_population_then_congestion() {
        assert_eq!(
            Metric::Combined.fields(),
            &[SeriesField::Population, SeriesField::Congestion]
        );
    }
}
