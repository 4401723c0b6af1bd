//! SVG line chart of the rebased series against the reference curve.

use crate::domain::date_label::short_label;
use crate::domain::error::TrackerError;
use crate::domain::report::ComparisonReport;
use crate::ports::report_port::ReportPort;

/// Line colours by slot.
const SLOT_COLORS: [&str; 5] = ["#FF6384", "#36A2EB", "#FFCE56", "#4BC0C0", "#9966FF"];
const REFERENCE_COLOR: &str = "#000000";
const GRID_COLOR: &str = "#CCCCCC";

const WIDTH: f64 = 900.0;
const HEIGHT: f64 = 450.0;
const PADDING: f64 = 60.0;
const LEGEND_HEIGHT: f64 = 24.0;
const MAX_X_LABELS: usize = 12;
const Y_TICKS: usize = 6;

#[derive(Debug, Default)]
pub struct SvgChartAdapter;

impl ReportPort for SvgChartAdapter {
    fn render(&self, report: &ComparisonReport) -> Result<String, TrackerError> {
        Ok(generate_chart_svg(report))
    }
}

struct Frame {
    min: f64,
    max: f64,
    len: usize,
}

impl Frame {
    fn plot_width() -> f64 {
        WIDTH - 2.0 * PADDING
    }

    fn plot_height() -> f64 {
        HEIGHT - 2.0 * PADDING - LEGEND_HEIGHT
    }

    fn x(&self, i: usize) -> f64 {
        if self.len > 1 {
            PADDING + i as f64 * Self::plot_width() / (self.len - 1) as f64
        } else {
            PADDING + Self::plot_width() / 2.0
        }
    }

    fn y(&self, value: f64) -> f64 {
        let range = self.max - self.min;
        let scale = if range > 0.0 {
            Self::plot_height() / range
        } else {
            1.0
        };
        PADDING + LEGEND_HEIGHT + Self::plot_height() - (value - self.min) * scale
    }
}

pub fn generate_chart_svg(report: &ComparisonReport) -> String {
    let values = report
        .rows
        .iter()
        .flat_map(|row| row.rebased.iter().flatten().copied())
        .chain(report.reference_curve.iter().copied())
        .filter(|v| v.is_finite());

    // The zero line is always in view.
    let (min, max) = values.fold((0.0_f64, 0.0_f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    let frame = Frame {
        min,
        max,
        len: report.date_window_labels.len(),
    };

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w:.0}" height="{h:.0}" viewBox="0 0 {w:.0} {h:.0}" font-family="sans-serif" font-size="11">
<rect width="100%" height="100%" fill="white"/>
<text x="{cx:.1}" y="24" text-anchor="middle" font-size="16">Price Change % for Selected Items</text>
"#,
        w = WIDTH,
        h = HEIGHT,
        cx = WIDTH / 2.0,
    );

    svg.push_str(&y_axis(&frame));
    svg.push_str(&x_axis(&frame, &report.date_window_labels));

    let reference: Vec<Option<f64>> = report.reference_curve.iter().map(|v| Some(*v)).collect();
    svg.push_str(&format!(
        "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"1\" stroke-dasharray=\"5,5\"/>\n",
        path_data(&frame, &reference),
        REFERENCE_COLOR
    ));

    for row in &report.rows {
        let d = path_data(&frame, &row.rebased);
        if d.is_empty() {
            continue;
        }
        svg.push_str(&format!(
            "<path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"2\"/>\n",
            d,
            slot_color(row.slot)
        ));
    }

    svg.push_str(&legend(report));
    svg.push_str("</svg>\n");
    svg
}

fn slot_color(slot: usize) -> &'static str {
    SLOT_COLORS[slot % SLOT_COLORS.len()]
}

/// Path commands for a series; gaps (`None`) start a new sub-path.
fn path_data(frame: &Frame, series: &[Option<f64>]) -> String {
    let mut parts = Vec::with_capacity(series.len());
    let mut pen_down = false;
    for (i, value) in series.iter().enumerate() {
        match value {
            Some(v) => {
                let cmd = if pen_down { 'L' } else { 'M' };
                parts.push(format!("{}{:.1},{:.1}", cmd, frame.x(i), frame.y(*v)));
                pen_down = true;
            }
            None => pen_down = false,
        }
    }
    parts.join(" ")
}

fn y_axis(frame: &Frame) -> String {
    let mut out = String::new();
    let step = (frame.max - frame.min) / (Y_TICKS - 1) as f64;
    let left = PADDING;
    let right = WIDTH - PADDING;

    if step > 0.0 {
        for t in 0..Y_TICKS {
            let value = frame.min + step * t as f64;
            let y = frame.y(value);
            out.push_str(&format!(
                "<line x1=\"{left:.1}\" y1=\"{y:.1}\" x2=\"{right:.1}\" y2=\"{y:.1}\" stroke=\"{GRID_COLOR}\" stroke-width=\"1\"/>\n\
                 <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\">{:.1}%</text>\n",
                left - 6.0,
                y + 4.0,
                value
            ));
        }
    }

    let zero = frame.y(0.0);
    out.push_str(&format!(
        "<line x1=\"{left:.1}\" y1=\"{zero:.1}\" x2=\"{right:.1}\" y2=\"{zero:.1}\" stroke=\"#000000\" stroke-width=\"2\"/>\n"
    ));
    out.push_str(&format!(
        "<text x=\"16\" y=\"{:.1}\" transform=\"rotate(-90 16 {:.1})\" text-anchor=\"middle\">% Change vs. Start Date</text>\n",
        HEIGHT / 2.0,
        HEIGHT / 2.0
    ));
    out
}

fn x_axis(frame: &Frame, labels: &[String]) -> String {
    if labels.is_empty() {
        return String::new();
    }
    let every = labels.len().div_ceil(MAX_X_LABELS).max(1);
    let baseline = HEIGHT - PADDING + 18.0;

    labels
        .iter()
        .enumerate()
        .filter(|(i, _)| i % every == 0 || *i == labels.len() - 1)
        .map(|(i, label)| {
            format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{}</text>\n",
                frame.x(i),
                baseline,
                xml_escape(&short_label(label))
            )
        })
        .collect()
}

fn legend(report: &ComparisonReport) -> String {
    let y = PADDING;
    let mut x = PADDING;
    let mut out = format!(
        "<line x1=\"{x:.1}\" y1=\"{y:.1}\" x2=\"{:.1}\" y2=\"{y:.1}\" stroke=\"{REFERENCE_COLOR}\" stroke-dasharray=\"5,5\"/>\n\
         <text x=\"{:.1}\" y=\"{:.1}\">{}% Annual Growth Reference</text>\n",
        x + 20.0,
        x + 24.0,
        y + 4.0,
        report.annual_rate_pct
    );
    x += 200.0;

    for row in &report.rows {
        out.push_str(&format!(
            "<rect x=\"{x:.1}\" y=\"{:.1}\" width=\"12\" height=\"12\" fill=\"{}\"/>\n\
             <text x=\"{:.1}\" y=\"{:.1}\">{}</text>\n",
            y - 6.0,
            slot_color(row.slot),
            x + 16.0,
            y + 4.0,
            xml_escape(&row.item_name)
        ));
        x += 16.0 + 7.0 * row.item_name.chars().count() as f64 + 12.0;
    }
    out
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::Dataset;
    use crate::domain::date_label::MonthYear;
    use crate::domain::report::Selection;

    fn report(items: &[usize]) -> ComparisonReport {
        let ds = Dataset::parse(
            "name,category,12/01/2019,1/01/2020,2/01/2020,3/01/2020\n\
             All-items (avg.),All-items,100,102,104,110\n\
             Fish & chips,Food,100,,95,97\n",
        )
        .unwrap();
        let sel = Selection::new(MonthYear::new(11, 2019), MonthYear::new(2, 2020)).with_items(items);
        ComparisonReport::build(&ds, &sel).unwrap()
    }

    #[test]
    fn chart_has_reference_and_item_paths() {
        let svg = generate_chart_svg(&report(&[0, 1]));

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("stroke-dasharray=\"5,5\""));
        assert!(svg.contains("stroke=\"#FF6384\""));
        assert!(svg.contains("stroke=\"#36A2EB\""));
        assert!(svg.contains("Dec-2019"));
        assert!(svg.contains("Mar-2020"));
    }

    #[test]
    fn item_names_are_escaped() {
        let svg = generate_chart_svg(&report(&[1]));
        assert!(svg.contains("Fish &amp; chips"));
        assert!(!svg.contains("Fish & chips"));
    }

    #[test]
    fn gaps_split_the_path() {
        let frame = Frame {
            min: 0.0,
            max: 10.0,
            len: 4,
        };
        let d = path_data(&frame, &[Some(0.0), None, Some(5.0), Some(10.0)]);
        assert_eq!(d.matches('M').count(), 2);
        assert_eq!(d.matches('L').count(), 1);
    }

    #[test]
    fn all_missing_series_draws_nothing() {
        let frame = Frame {
            min: 0.0,
            max: 1.0,
            len: 2,
        };
        assert!(path_data(&frame, &[None, None]).is_empty());
    }

    #[test]
    fn empty_selection_still_draws_reference() {
        let svg = generate_chart_svg(&report(&[]));
        assert!(svg.contains("stroke-dasharray=\"5,5\""));
        assert!(!svg.contains("#FF6384"));
    }

    #[test]
    fn y_scale_maps_range_to_plot_area() {
        let frame = Frame {
            min: -10.0,
            max: 10.0,
            len: 3,
        };
        let top = frame.y(10.0);
        let bottom = frame.y(-10.0);
        assert!((top - (PADDING + LEGEND_HEIGHT)).abs() < 1e-9);
        assert!((bottom - (HEIGHT - PADDING)).abs() < 1e-9);
        assert!((frame.x(0) - PADDING).abs() < 1e-9);
        assert!((frame.x(2) - (WIDTH - PADDING)).abs() < 1e-9);
    }
}
