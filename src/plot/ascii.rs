//! ASCII bar rendering for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)

use crate::domain::ChartModel;

/// Render a horizontal bar per axis month, scaled to `width` columns.
///
/// Bars use `#`, one row per month, with the raw count appended. A zero
/// series renders empty bars rather than failing.
pub fn render_month_bars(chart: &ChartModel, width: usize) -> String {
    let width = width.max(1);
    let max = chart.series.iter().copied().max().unwrap_or(0);

    let mut out = String::new();
    for (label, &count) in chart.labels.iter().zip(chart.series.iter()) {
        let bar_len = if max == 0 {
            0
        } else {
            // Round up so any non-zero month is visible.
            ((count as f64 / max as f64) * width as f64).ceil() as usize
        };
        out.push_str(&format!(
            "{label} |{:<width$}| {count}\n",
            "#".repeat(bar_len)
        ));
    }
    if !chart.status.is_empty() {
        out.push_str(&format!("{}\n", chart.status));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_scale_to_the_maximum_count() {
        let chart = ChartModel {
            labels: vec!["2024-06".into(), "2024-07".into()],
            series: vec![10, 5],
            status: String::new(),
        };
        let plot = render_month_bars(&chart, 20);
        let lines: Vec<&str> = plot.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].matches('#').count(), 20);
        assert_eq!(lines[1].matches('#').count(), 10);
        assert!(lines[0].ends_with("| 10"));
    }

    #[test]
    fn zero_series_renders_empty_bars_and_status() {
        let chart = ChartModel {
            labels: vec!["2024-06".into()],
            series: vec![0],
            status: "No data for the selected filters".into(),
        };
        let plot = render_month_bars(&chart, 10);
        assert!(!plot.contains('#'));
        assert!(plot.contains("No data for the selected filters"));
    }

    #[test]
    fn nonzero_months_are_always_visible() {
        let chart = ChartModel {
            labels: vec!["2024-06".into(), "2024-07".into()],
            series: vec![1000, 1],
            status: String::new(),
        };
        let plot = render_month_bars(&chart, 30);
        let lines: Vec<&str> = plot.lines().collect();
        assert!(lines[1].contains('#'));
    }
}
