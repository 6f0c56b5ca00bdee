//! Trends view state: metric selection, load lifecycle, stale-discard.
//!
//! This is deliberately free of I/O and rendering so the ordering guarantee
//! can be tested directly. The event loop in `tui::mod` owns the worker
//! threads and the outcome channel; this type only decides what the current
//! state is and whether an arriving outcome is still relevant.

use crate::data::api::FetchError;
use crate::domain::{LoadState, Metric, TrendRow};

/// Handed out on every selection change; the caller runs the fetch and
/// reports back with the same generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub metric: Metric,
    pub generation: u64,
}

/// The trends page's view state.
///
/// Owns the selected metric and the load state exclusively. Each selection
/// change bumps the generation counter; an outcome is applied only if its
/// generation still matches, so a slow earlier response can never overwrite a
/// faster later one. The in-flight request itself is not aborted — only its
/// effect is suppressed.
pub struct TrendsView {
    active: Metric,
    state: LoadState,
    generation: u64,
}

impl TrendsView {
    /// A fresh view already in `Loading` for `initial`; the returned ticket
    /// starts the first fetch.
    pub fn new(initial: Metric) -> (Self, FetchTicket) {
        let view = Self {
            active: initial,
            state: LoadState::Loading,
            generation: 0,
        };
        let ticket = FetchTicket {
            metric: initial,
            generation: 0,
        };
        (view, ticket)
    }

    pub fn active(&self) -> Metric {
        self.active
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Change the selected metric.
    ///
    /// Sets `Loading` synchronously and invalidates any in-flight fetch by
    /// bumping the generation. Selecting the already-active metric is a
    /// refresh, not a no-op.
    pub fn select(&mut self, metric: Metric) -> FetchTicket {
        self.active = metric;
        self.generation += 1;
        self.state = LoadState::Loading;
        FetchTicket {
            metric,
            generation: self.generation,
        }
    }

    /// Re-fetch the active metric (the only retry trigger).
    pub fn refresh(&mut self) -> FetchTicket {
        self.select(self.active)
    }

    /// Apply a fetch outcome; compare-and-discard on a stale generation.
    ///
    /// Returns whether the outcome was applied. Stale outcomes — success or
    /// error — must not mutate the load state.
    pub fn apply(
        &mut self,
        generation: u64,
        result: Result<Vec<TrendRow>, FetchError>,
    ) -> bool {
        if generation != self.generation {
            return false;
        }
        self.state = match result {
            Ok(rows) => LoadState::Success(rows),
            Err(err) => LoadState::Error(err.to_string()),
        };
        true
    }

    /// Chart title for the active metric.
    pub fn title(&self) -> &'static str {
        self.active.title()
    }

    /// `"{min}–{max}"` over the parseable integer year labels of the loaded
    /// rows, independent of row order; `—` when nothing parseable is loaded.
    pub fn range_label(&self) -> String {
        let Some(rows) = self.state.rows() else {
            return RANGE_PLACEHOLDER.to_string();
        };

        let mut bounds: Option<(i64, i64)> = None;
        for row in rows {
            let Ok(year) = row.year.trim().parse::<i64>() else {
                continue;
            };
            bounds = Some(match bounds {
                None => (year, year),
                Some((min, max)) => (min.min(year), max.max(year)),
            });
        }

        match bounds {
            Some((min, max)) => format!("{min}–{max}"),
            None => RANGE_PLACEHOLDER.to_string(),
        }
    }
}

pub const RANGE_PLACEHOLDER: &str = "—";

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(years: &[&str]) -> Vec<TrendRow> {
        years.iter().map(|y| TrendRow::with_year(*y)).collect()
    }

    #[test]
    fn new_view_starts_loading() {
        let (view, ticket) = TrendsView::new(Metric::Population);
        assert_eq!(*view.state(), LoadState::Loading);
        assert_eq!(ticket.metric, Metric::Population);
    }

    #[test]
    fn select_sets_loading_before_any_completion() {
        let (mut view, ticket) = TrendsView::new(Metric::Population);
        view.apply(ticket.generation, Ok(rows(&["2014"])));

        for metric in Metric::ALL {
            view.select(metric);
            assert_eq!(*view.state(), LoadState::Loading);
            assert_eq!(view.active(), metric);
        }
    }

    #[test]
    fn stale_success_is_discarded() {
        let (mut view, first) = TrendsView::new(Metric::Population);
        let second = view.select(Metric::Congestion);

        // The response for the superseded selection arrives late.
        assert!(!view.apply(first.generation, Ok(rows(&["1999"]))));
        assert_eq!(*view.state(), LoadState::Loading);

        assert!(view.apply(second.generation, Ok(rows(&["2020"]))));
        assert_eq!(view.range_label(), "2020–2020");
    }

    #[test]
    fn stale_error_is_discarded_too() {
        let (mut view, first) = TrendsView::new(Metric::Population);
        let second = view.select(Metric::Car);

        let err = FetchError::Request {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        };
        assert!(!view.apply(first.generation, Err(err)));
        assert_eq!(*view.state(), LoadState::Loading);

        assert!(view.apply(second.generation, Ok(rows(&["2021"]))));
        assert!(matches!(view.state(), LoadState::Success(_)));
    }

    #[test]
    fn only_last_of_rapid_selections_wins() {
        let (mut view, t0) = TrendsView::new(Metric::Population);
        let t1 = view.select(Metric::Congestion);
        let t2 = view.select(Metric::Car);
        let t3 = view.select(Metric::Combined);

        // Responses arrive out of order; only t3's may land.
        assert!(!view.apply(t1.generation, Ok(rows(&["2001"]))));
        assert!(!view.apply(t0.generation, Ok(rows(&["2000"]))));
        assert!(view.apply(t3.generation, Ok(rows(&["2003"]))));
        assert!(!view.apply(t2.generation, Ok(rows(&["2002"]))));

        assert_eq!(view.range_label(), "2003–2003");
        assert_eq!(view.active(), Metric::Combined);
    }

    #[test]
    fn http_error_becomes_error_state_with_status_line_text() {
        let (mut view, ticket) = TrendsView::new(Metric::Population);
        let err = FetchError::Request {
            status: 500,
            status_text: "Internal Server Error".to_string(),
        };
        assert!(view.apply(ticket.generation, Err(err)));
        assert_eq!(
            *view.state(),
            LoadState::Error("500 Internal Server Error".to_string())
        );
    }

    #[test]
    fn empty_rows_is_success_with_placeholder_range() {
        let (mut view, ticket) = TrendsView::new(Metric::Congestion);
        assert!(view.apply(ticket.generation, Ok(Vec::new())));
        assert_eq!(*view.state(), LoadState::Success(Vec::new()));
        assert_eq!(view.range_label(), RANGE_PLACEHOLDER);
    }

    #[test]
    fn range_label_is_min_max_over_unsorted_years() {
        let (mut view, ticket) = TrendsView::new(Metric::Population);
        view.apply(ticket.generation, Ok(rows(&["2016", "2014", "2018"])));
        assert_eq!(view.range_label(), "2014–2018");
    }

    #[test]
    fn non_numeric_years_are_skipped_in_range() {
        let (mut view, ticket) = TrendsView::new(Metric::Population);
        view.apply(ticket.generation, Ok(rows(&["n/a", "2015", ""])));
        assert_eq!(view.range_label(), "2015–2015");

        let next = view.refresh();
        view.apply(next.generation, Ok(rows(&["n/a", ""])));
        assert_eq!(view.range_label(), RANGE_PLACEHOLDER);
    }

    #[test]
    fn refresh_reselects_the_same_metric() {
        let (mut view, first) = TrendsView::new(Metric::Car);
        view.apply(first.generation, Ok(rows(&["2014"])));

        let ticket = view.refresh();
        assert_eq!(ticket.metric, Metric::Car);
        assert_eq!(*view.state(), LoadState::Loading);
        // The pre-refresh generation is now stale.
        assert!(!view.apply(first.generation, Ok(rows(&["1990"]))));
    }

    #[test]
    fn range_label_is_placeholder_while_loading_or_error() {
        let (mut view, ticket) = TrendsView::new(Metric::Population);
        assert_eq!(view.range_label(), RANGE_PLACEHOLDER);

        view.apply(ticket.generation, Err(FetchError::Network("boom".into())));
        assert_eq!(view.range_label(), RANGE_PLACEHOLDER);
        assert_eq!(*view.state(), LoadState::Error("boom".to_string()));
    }
}
