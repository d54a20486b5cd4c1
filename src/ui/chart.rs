//! ASCII rendering of the progress time series.

use crate::models::ChartPoint;

const BAR_WIDTH: usize = 40;

/// Render the chart as one bar line per point, in the order given (the
/// controller already sorts ascending by date). An empty series renders the
/// placeholder message instead of axes.
pub fn render(points: &[ChartPoint]) -> String {
    if points.is_empty() {
        return "No progress recorded yet.".to_string();
    }
    let mut out = String::new();
    for point in points {
        let filled = (point.percentage.clamp(0, 100) as usize * BAR_WIDTH) / 100;
        let bar: String = "█".repeat(filled) + &"░".repeat(BAR_WIDTH - filled);
        out.push_str(&format!(
            "{}  {} {:>3}%\n",
            point.date, bar, point.percentage
        ));
    }
    out
}
