//! Plotters-powered monthly bar chart widget for Ratatui.
//!
//! Why Plotters instead of Ratatui's built-in `BarChart` widget for the
//! time-series panel?
//! - proper y-axis scaling + tick labels for free
//! - per-month x labels without manual layout math
//! - easy to extend later (thresholds, annotations, exportable backends)
//!
//! We render Plotters output into the Ratatui buffer using
//! `plotters-ratatui-backend`.

use plotters::prelude::*;
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// A lightweight, render-only chart description.
///
/// The widget is intentionally data-driven: labels and series come straight
/// from the reconciled chart model and are computed outside the render call.
pub struct MonthlyBarsChart<'a> {
    /// Axis labels, one per bar, in fixed axis order.
    pub labels: &'a [String],
    /// Bar heights, same length and order as `labels`.
    pub series: &'a [u64],
}

impl<'a> Widget for MonthlyBarsChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a
        // chart. In that case, render a small hint rather than panicking.
        if area.width < 20 || area.height < 6 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        if self.labels.is_empty() || self.labels.len() != self.series.len() {
            return;
        }

        let n = self.series.len();
        // Keep a visible y range even when every month is zero.
        let y_max = self.series.iter().copied().max().unwrap_or(0).max(1) as f64 * 1.05;
        let labels = self.labels;
        let series = self.series;

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Terminal cells are low-res, so keep label areas compact.
                .set_label_area_size(LabelAreaPosition::Left, 6)
                .set_label_area_size(LabelAreaPosition::Bottom, 2)
                .build_cartesian_2d(0f64..n as f64, 0f64..y_max)?;

            // Series styling: keep the palette high-contrast for terminal
            // readability.
            let bar_color = RGBColor(0, 255, 255); // cyan

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(n)
                .y_labels(5)
                .x_label_formatter(&|v| {
                    let idx = v.floor() as usize;
                    // Tick positions land between bars; label the bar the
                    // tick falls inside, short `MM` form to fit the cells.
                    labels
                        .get(idx)
                        .map(|label| label.chars().skip(5).collect::<String>())
                        .unwrap_or_default()
                })
                .y_label_formatter(&|v| format!("{v:.0}"))
                .label_style(("sans-serif", 10).into_font().color(&WHITE))
                .axis_style(&WHITE)
                .draw()?;

            for (i, &count) in series.iter().enumerate() {
                let x0 = i as f64 + 0.15;
                let x1 = i as f64 + 0.85;
                chart.draw_series(std::iter::once(Rectangle::new(
                    [(x0, 0.0), (x1, count as f64)],
                    bar_color.filled(),
                )))?;
            }

            Ok(())
        });

        widget.render(area, buf);
    }
}
