//! Ratatui-based terminal dashboard.
//!
//! Four pages mirror the web navigation surface: a home landing page, a map
//! placeholder, the historical-trends chart view, and the eco-impact chart
//! view. The trends page is the only one that talks to the network: fetches
//! run on worker threads and report back over a channel tagged with the
//! generation that issued them, so the UI thread never blocks and stale
//! responses never land.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use plotters::style::RGBColor;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Tabs},
    Terminal,
};

use crate::cli::TuiArgs;
use crate::data::api::{FetchError, TrendsClient};
use crate::data::eco::{EMISSION_PER_KM, MODAL_SHARE, MODAL_SHARE_SERIES};
use crate::domain::{EcoTab, LoadState, Metric, Page, SeriesField, TrendRow};
use crate::error::AppError;

mod plotters_chart;
pub mod trends;

use plotters_chart::{ChartKind, ChartSeries, TrendPlottersChart};
use trends::TrendsView;

/// Start the TUI.
pub fn run(args: TuiArgs) -> Result<(), AppError> {
    let client = match &args.base {
        Some(base) => TrendsClient::with_base(base),
        None => TrendsClient::from_env(),
    };

    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(client, args.metric);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

/// A completed fetch, tagged with the generation that issued it.
struct FetchOutcome {
    generation: u64,
    result: Result<Vec<TrendRow>, FetchError>,
}

/// Run one fetch on a worker thread.
///
/// The worker sends its outcome back over the channel tagged with the issuing
/// generation; if the selection has moved on by the time it arrives, the view
/// discards it unapplied.
fn spawn_fetch(client: TrendsClient, ticket: trends::FetchTicket, tx: Sender<FetchOutcome>) {
    thread::spawn(move || {
        let result = client.fetch_rows(ticket.metric);
        let _ = tx.send(FetchOutcome {
            generation: ticket.generation,
            result,
        });
    });
}

struct App {
    page: Page,
    trends: TrendsView,
    eco_tab: EcoTab,
    client: TrendsClient,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
    initial_metric: Metric,
    status: String,
}

impl App {
    fn new(client: TrendsClient, initial_metric: Metric) -> Self {
        let (tx, rx) = mpsc::channel();
        let (trends, ticket) = TrendsView::new(initial_metric);
        spawn_fetch(client.clone(), ticket, tx.clone());

        Self {
            page: Page::Home,
            trends,
            eco_tab: EcoTab::Co2,
            client,
            tx,
            rx,
            initial_metric,
            status: format!("Fetching {}…", initial_metric.tab_label()),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if self.drain_outcomes() {
                needs_redraw = true;
            }

            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Apply any finished fetches. Stale outcomes are discarded by the view's
    /// generation check; they don't even update the status line.
    fn drain_outcomes(&mut self) -> bool {
        let mut applied = false;
        while let Ok(outcome) = self.rx.try_recv() {
            if self.trends.apply(outcome.generation, outcome.result) {
                applied = true;
                self.status = match self.trends.state() {
                    LoadState::Success(rows) => {
                        format!("Loaded {} rows ({})", rows.len(), self.trends.range_label())
                    }
                    LoadState::Error(_) => "Fetch failed.".to_string(),
                    LoadState::Loading => String::new(),
                };
            }
        }
        applied
    }

    /// Returns true when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Tab => self.goto(self.page.next()),
            KeyCode::BackTab => self.goto(self.page.prev()),
            KeyCode::Char('h') => self.goto(Page::Home),
            KeyCode::Char('m') => self.goto(Page::Map),
            KeyCode::Char('t') => self.goto(Page::Trends),
            KeyCode::Char('e') => self.goto(Page::EcoInsights),
            _ => self.handle_page_key(code),
        }
        false
    }

    fn handle_page_key(&mut self, code: KeyCode) {
        match self.page {
            Page::Trends => match code {
                KeyCode::Left => self.select_metric(self.trends.active().prev()),
                KeyCode::Right => self.select_metric(self.trends.active().next()),
                KeyCode::Char('r') => {
                    let ticket = self.trends.refresh();
                    spawn_fetch(self.client.clone(), ticket, self.tx.clone());
                    self.status = format!("Refreshing {}…", self.trends.active().tab_label());
                }
                KeyCode::Char('d') => match crate::debug::write_debug_bundle(&self.trends) {
                    Ok(path) => {
                        self.status = format!("Wrote debug bundle: {}", path.display());
                    }
                    Err(err) => {
                        self.status = format!("Debug write failed: {err}");
                    }
                },
                _ => {}
            },
            Page::EcoInsights => match code {
                KeyCode::Left | KeyCode::Right => {
                    self.eco_tab = self.eco_tab.toggle();
                    self.status = format!("eco: {}", self.eco_tab.tab_label());
                }
                _ => {}
            },
            _ => {}
        }
    }

    fn select_metric(&mut self, metric: Metric) {
        let ticket = self.trends.select(metric);
        spawn_fetch(self.client.clone(), ticket, self.tx.clone());
        self.status = format!("Fetching {}…", metric.tab_label());
    }

    fn goto(&mut self, page: Page) {
        if page == self.page {
            return;
        }
        let leaving_trends = self.page == Page::Trends;
        self.page = page;

        // Navigation remounts the trends view: selection resets to the
        // default and a fresh fetch starts. The generation counter keeps
        // increasing across remounts, so anything still in flight from the
        // previous instance is stale by construction.
        if leaving_trends {
            let ticket = self.trends.select(self.initial_metric);
            spawn_fetch(self.client.clone(), ticket, self.tx.clone());
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        match self.page {
            Page::Home => self.draw_home(frame, chunks[1]),
            Page::Map => self.draw_map(frame, chunks[1]),
            Page::Trends => self.draw_trends(frame, chunks[1]),
            Page::EcoInsights => self.draw_eco(frame, chunks[1]),
        }
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let titles: Vec<Line> = Page::ALL.iter().map(|p| Line::from(p.tab_label())).collect();
        let selected = Page::ALL.iter().position(|p| *p == self.page).unwrap_or(0);

        let tabs = Tabs::new(titles)
            .select(selected)
            .highlight_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled("cbd", Style::default().fg(Color::Cyan)))
                    .title(" — Melbourne CBD parking & traffic"),
            );
        frame.render_widget(tabs, area);
    }

    fn draw_home(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "In the City:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("Melbourne Parking For You"),
            Line::from(""),
            Line::from(Span::styled(
                "m Map   t Trends   e Eco Insights",
                Style::default().fg(Color::Gray),
            )),
        ];
        let p = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_map(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from("The live-traffic map is rendered by the external mapping"),
            Line::from("service in the web build and has no terminal equivalent."),
            Line::from(""),
            Line::from(Span::styled(
                format!("API base: {}", self.client.base()),
                Style::default().fg(Color::Gray),
            )),
        ];
        let p = Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Live Traffic Map"));
        frame.render_widget(p, area);
    }

    fn draw_trends(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("HISTORICAL TRENDS — MELBOURNE CBD")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        self.draw_metric_tabs(frame, chunks[0]);

        // Title row: chart title on the left, range label on the right.
        let title = Line::from(vec![
            Span::styled(
                self.trends.title(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(self.trends.range_label(), Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(title), chunks[1]);

        self.draw_trend_body(frame, chunks[2]);
    }

    fn draw_metric_tabs(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let titles: Vec<Line> = Metric::ALL
            .iter()
            .map(|m| Line::from(m.tab_label()))
            .collect();
        let selected = Metric::ALL
            .iter()
            .position(|m| *m == self.trends.active())
            .unwrap_or(0);

        let tabs = Tabs::new(titles).select(selected).highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(tabs, area);
    }

    fn draw_trend_body(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        frame.render_widget(Clear, area);

        match self.trends.state() {
            LoadState::Loading => {
                let msg = Paragraph::new("Loading…").style(Style::default().fg(Color::Yellow));
                frame.render_widget(msg, area);
            }
            LoadState::Error(message) => {
                let msg = Paragraph::new(format!("Error: {message}"))
                    .style(Style::default().fg(Color::Red));
                frame.render_widget(msg, area);
            }
            LoadState::Success(rows) => {
                let data = trend_chart_data(self.trends.active(), rows);
                let widget = TrendPlottersChart {
                    kind: data.kind,
                    series: &data.series,
                    x_ticks: &data.x_ticks,
                    x_bounds: data.x_bounds,
                    y_bounds: data.y_bounds,
                    y_label: "",
                };
                frame.render_widget(widget, area);
            }
        }
    }

    fn draw_eco(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let block = Block::default()
            .title("ENVIRONMENTAL IMPACT — TRANSPORT INSIGHTS IN THE CBD")
            .borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(0),
            ])
            .split(inner);

        let titles: Vec<Line> = [EcoTab::Co2, EcoTab::Mode]
            .iter()
            .map(|t| Line::from(t.tab_label()))
            .collect();
        let selected = if self.eco_tab == EcoTab::Co2 { 0 } else { 1 };
        let tabs = Tabs::new(titles).select(selected).highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(tabs, chunks[0]);

        let title = Line::from(vec![
            Span::styled(
                self.eco_tab.title(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(self.eco_tab.range_note(), Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(Paragraph::new(title), chunks[1]);

        match self.eco_tab {
            EcoTab::Co2 => draw_emission_bars(frame, chunks[2]),
            EcoTab::Mode => draw_modal_share(frame, chunks[2]),
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = match self.page {
            Page::Trends => "Tab pages  ←/→ metric  r refresh  d debug  q quit",
            Page::EcoInsights => "Tab pages  ←/→ graph  q quit",
            _ => "Tab pages  h/m/t/e jump  q quit",
        };
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

/// Series colors carried over from the web dashboard's palette.
mod palette {
    use plotters::style::RGBColor;

    pub const POPULATION: RGBColor = RGBColor(59, 130, 246);
    pub const CONGESTION: RGBColor = RGBColor(245, 158, 11);
    pub const CONGESTION_VS: RGBColor = RGBColor(239, 68, 68);
    pub const CAR: RGBColor = RGBColor(16, 185, 129);

    pub const ECO_WALK: RGBColor = RGBColor(14, 165, 233);
    pub const ECO_BIKE: RGBColor = RGBColor(16, 185, 129);
    pub const ECO_TRAM: RGBColor = RGBColor(99, 102, 241);
    pub const ECO_TRAIN: RGBColor = RGBColor(59, 130, 246);
    pub const ECO_BUS: RGBColor = RGBColor(245, 158, 11);
    pub const ECO_CAR: RGBColor = RGBColor(239, 68, 68);
}

struct TrendChartData {
    kind: ChartKind,
    series: Vec<ChartSeries>,
    x_ticks: Vec<String>,
    x_bounds: [f64; 2],
    y_bounds: [f64; 2],
}

/// Build the chart description for a metric over loaded rows.
///
/// Rows with an absent value contribute no point for that series; the x axis
/// is the row index so out-of-order and non-numeric year labels still render
/// in received order.
fn trend_chart_data(metric: Metric, rows: &[TrendRow]) -> TrendChartData {
    let kind = match metric {
        Metric::Population => ChartKind::Area,
        Metric::Congestion | Metric::Car => ChartKind::Line,
        Metric::Combined => ChartKind::MultiLine,
    };

    let x_ticks: Vec<String> = rows.iter().map(|r| r.year.clone()).collect();

    let mut series = Vec::new();
    for &field in metric.fields() {
        let points: Vec<(f64, f64)> = rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| field.get(row).map(|v| (i as f64, v)))
            .collect();
        series.push(ChartSeries {
            name: field.label(),
            color: series_color(metric, field),
            points,
        });
    }

    let x_max = rows.len().saturating_sub(1).max(1) as f64;
    let x_bounds = [0.0, x_max];

    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for s in &series {
        for &(_, y) in &s.points {
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }

    // Baseline at zero like the web charts; pad the top so lines don't hug
    // the frame.
    y_min = y_min.min(0.0);
    if !y_min.is_finite() || !y_max.is_finite() || y_max <= y_min {
        y_min = 0.0;
        y_max = 1.0;
    }
    let pad = ((y_max - y_min).abs() * 0.05).max(1e-12);
    let y_bounds = [y_min, y_max + pad];

    TrendChartData {
        kind,
        series,
        x_ticks,
        x_bounds,
        y_bounds,
    }
}

fn series_color(metric: Metric, field: SeriesField) -> RGBColor {
    match (metric, field) {
        // The combined chart draws congestion in red, not amber.
        (Metric::Combined, SeriesField::Congestion) => palette::CONGESTION_VS,
        (_, SeriesField::Population) => palette::POPULATION,
        (_, SeriesField::Congestion) => palette::CONGESTION,
        (_, SeriesField::Car) => palette::CAR,
    }
}

fn draw_emission_bars(frame: &mut ratatui::Frame<'_>, area: Rect) {
    let bars: Vec<Bar> = EMISSION_PER_KM
        .iter()
        .map(|row| {
            Bar::default()
                .value(row.co2)
                .label(Line::from(row.mode))
                .text_value(format!("{}", row.co2))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(13)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Green))
        .value_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(chart, area);
}

fn draw_modal_share(frame: &mut ratatui::Frame<'_>, area: Rect) {
    const COLORS: [RGBColor; 6] = [
        palette::ECO_WALK,
        palette::ECO_BIKE,
        palette::ECO_TRAM,
        palette::ECO_TRAIN,
        palette::ECO_BUS,
        palette::ECO_CAR,
    ];

    let x_ticks: Vec<String> = MODAL_SHARE.iter().map(|r| r.year.to_string()).collect();

    let mut series = Vec::new();
    let mut y_max = 0.0_f64;
    for (idx, &(name, get)) in MODAL_SHARE_SERIES.iter().enumerate() {
        let points: Vec<(f64, f64)> = MODAL_SHARE
            .iter()
            .enumerate()
            .map(|(i, row)| (i as f64, get(row)))
            .collect();
        for &(_, y) in &points {
            y_max = y_max.max(y);
        }
        series.push(ChartSeries {
            name,
            color: COLORS[idx % COLORS.len()],
            points,
        });
    }

    let widget = TrendPlottersChart {
        kind: ChartKind::MultiLine,
        series: &series,
        x_ticks: &x_ticks,
        x_bounds: [0.0, (MODAL_SHARE.len() - 1) as f64],
        y_bounds: [0.0, y_max * 1.05],
        y_label: "%",
    };
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::normalize::normalize_row;
    use serde_json::json;

    fn sample_rows() -> Vec<TrendRow> {
        [
            json!({"year": 2014, "population": 160.0, "congestion": 20.0}),
            json!({"year": 2015, "population": 168.0}),
            json!({"year": 2016, "congestion": 24.0}),
        ]
        .iter()
        .map(normalize_row)
        .collect()
    }

    #[test]
    fn chart_kind_follows_metric() {
        let rows = sample_rows();
        assert_eq!(trend_chart_data(Metric::Population, &rows).kind, ChartKind::Area);
        assert_eq!(trend_chart_data(Metric::Congestion, &rows).kind, ChartKind::Line);
        assert_eq!(trend_chart_data(Metric::Car, &rows).kind, ChartKind::Line);
        assert_eq!(trend_chart_data(Metric::Combined, &rows).kind, ChartKind::MultiLine);
    }

    #[test]
    fn absent_values_produce_no_points() {
        let rows = sample_rows();
        let data = trend_chart_data(Metric::Population, &rows);
        // Population is absent for 2016: two points, not three, and no zero.
        assert_eq!(data.series.len(), 1);
        assert_eq!(data.series[0].points, vec![(0.0, 160.0), (1.0, 168.0)]);
    }

    #[test]
    fn combined_carries_two_series() {
        let rows = sample_rows();
        let data = trend_chart_data(Metric::Combined, &rows);
        assert_eq!(data.series.len(), 2);
        assert_eq!(data.series[0].points, vec![(0.0, 160.0), (1.0, 168.0)]);
        assert_eq!(data.series[1].points, vec![(0.0, 20.0), (2.0, 24.0)]);
    }

    #[test]
    fn empty_rows_fall_back_to_unit_bounds() {
        let data = trend_chart_data(Metric::Population, &[]);
        assert!(data.series[0].points.is_empty());
        assert_eq!(data.y_bounds[0], 0.0);
        assert!(data.y_bounds[1] > 1.0 - 1e-9);
    }

    #[test]
    fn x_ticks_keep_received_order() {
        let rows: Vec<TrendRow> = [json!({"year": 2016}), json!({"year": 2014})]
            .iter()
            .map(normalize_row)
            .collect();
        let data = trend_chart_data(Metric::Car, &rows);
        assert_eq!(data.x_ticks, vec!["2016".to_string(), "2014".to_string()]);
    }
}
