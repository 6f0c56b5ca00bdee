//! Plotters-powered trend chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `Chart` widget?
//! - nicer axis + mesh rendering
//! - less manual work for ticks/labels
//! - easy to extend later (annotations, exportable PNG/SVG backends, etc.)
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
// The ratatui `Color` import below shadows the glob-imported trait of the
// same name, so pull it in anonymously for the `.mix()` calls.
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// Which chart variant to draw for the active selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    /// Filled area under a single line (population).
    Area,
    /// A single plain line (congestion, car ownership).
    Line,
    /// One line per series plus a legend (combined, modal share).
    MultiLine,
}

/// One plotted series: legend name, stroke color, and (x, y) points.
///
/// X values are row indices; the year labels come in separately as tick text
/// so non-numeric period labels still land in the right place.
pub struct ChartSeries {
    pub name: &'static str,
    pub color: RGBColor,
    pub points: Vec<(f64, f64)>,
}

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: all series and bounds are computed
/// outside the render call. This keeps `render()` focused on drawing and makes
/// it easy to test the data prep separately.
pub struct TrendPlottersChart<'a> {
    pub kind: ChartKind,
    pub series: &'a [ChartSeries],
    /// Tick text per x index (the year labels, in received order).
    pub x_ticks: &'a [String],
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    pub y_label: &'a str,
}

impl<'a> Widget for TrendPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 8 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let x0 = self.x_bounds[0];
        let x1 = self.x_bounds[1];
        let y0 = self.y_bounds[0];
        let y1 = self.y_bounds[1];

        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite())
            || x1 <= x0
            || y1 <= y0
        {
            return;
        }

        // `plotters-ratatui-backend` draws Plotters primitives via Ratatui's
        // `Canvas` widget, which ultimately writes to the terminal buffer.
        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                // Small margins keep the chart readable without wasting space.
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 3)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            // Axes + tick labels. The x axis is categorical: each integer
            // position maps to one received row's year label.
            //
            // Mesh lines are disabled to reduce visual clutter in
            // low-resolution terminal rendering.
            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .y_desc(self.y_label)
                .x_labels(self.x_ticks.len().clamp(2, 6))
                .y_labels(5)
                .x_label_formatter(&|v| {
                    let idx = v.round();
                    if (idx - v).abs() > 0.25 || idx < 0.0 {
                        return String::new();
                    }
                    self.x_ticks
                        .get(idx as usize)
                        .cloned()
                        .unwrap_or_default()
                })
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .bold_line_style(&WHITE)
                .draw()?;

            for series in self.series {
                let color = series.color;
                match self.kind {
                    ChartKind::Area => {
                        // Translucent fill under the line, like the web
                        // dashboard's gradient area chart.
                        chart.draw_series(AreaSeries::new(
                            series.points.iter().copied(),
                            0.0,
                            color.mix(0.3),
                        ))?;
                        chart.draw_series(LineSeries::new(
                            series.points.iter().copied(),
                            &color,
                        ))?;
                    }
                    ChartKind::Line => {
                        chart.draw_series(LineSeries::new(
                            series.points.iter().copied(),
                            &color,
                        ))?;
                    }
                    ChartKind::MultiLine => {
                        chart
                            .draw_series(LineSeries::new(
                                series.points.iter().copied(),
                                &color,
                            ))?
                            .label(series.name)
                            .legend(move |(x, y)| {
                                PathElement::new(vec![(x, y), (x + 10, y)], color)
                            });
                    }
                }
            }

            if self.kind == ChartKind::MultiLine {
                chart
                    .configure_series_labels()
                    .position(SeriesLabelPosition::UpperRight)
                    .background_style(BLACK.mix(0.6))
                    .border_style(WHITE)
                    .label_font(("sans-serif", 10).into_font().color(&WHITE))
                    .draw()?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(kind: ChartKind, series: &[ChartSeries]) -> Buffer {
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        let ticks: Vec<String> =
            ["2014", "2015", "2016"].iter().map(|s| s.to_string()).collect();
        TrendPlottersChart {
            kind,
            series,
            x_ticks: &ticks,
            x_bounds: [0.0, 2.0],
            y_bounds: [0.0, 3.0],
            y_label: "",
        }
        .render(area, &mut buf);
        buf
    }

    fn has_ink(buf: &Buffer) -> bool {
        buf.content().iter().any(|cell| cell.symbol() != " ")
    }

    #[test]
    fn area_chart_renders_into_the_buffer() {
        // Exercises the translucent area fill path.
        let series = [ChartSeries {
            name: "Population (×10k)",
            color: RGBColor(59, 130, 246),
            points: vec![(0.0, 1.0), (1.0, 2.0), (2.0, 1.5)],
        }];
        assert!(has_ink(&render(ChartKind::Area, &series)));
    }

    #[test]
    fn multi_line_chart_renders_with_legend() {
        // Exercises the legend path, including its translucent background.
        let series = [
            ChartSeries {
                name: "Population (×10k)",
                color: RGBColor(239, 68, 68),
                points: vec![(0.0, 1.0), (1.0, 2.0), (2.0, 2.5)],
            },
            ChartSeries {
                name: "Congestion",
                color: RGBColor(245, 158, 11),
                points: vec![(0.0, 0.5), (1.0, 1.0), (2.0, 1.5)],
            },
        ];
        assert!(has_ink(&render(ChartKind::MultiLine, &series)));
    }

    #[test]
    fn tiny_area_shows_a_hint_instead_of_drawing() {
        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);
        TrendPlottersChart {
            kind: ChartKind::Line,
            series: &[],
            x_ticks: &[],
            x_bounds: [0.0, 1.0],
            y_bounds: [0.0, 1.0],
            y_label: "",
        }
        .render(area, &mut buf);
        let first = buf.cell((0, 0)).map(|c| c.symbol().to_string());
        assert_eq!(first.as_deref(), Some("C"));
    }
}
