// loadtest_compare - Load Test Results Comparison & Charting
// Copyright (C) 2025 Laurence Oberman
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

/*!
    # chart.rs

    PNG rendering for the comparison:
    - `comparison.png`: grouped bars (Avg / P90 / P99 latency, Req/s), one bar per subject
    - `comparison_dashboard.png`: the same bars plus CPU % and memory (MiB) over time
*/

use std::error::Error;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::analyze::SubjectReport;
use crate::docker_stats::ResourceSample;
use crate::error::{AnalyzeError, Result};

pub const CATEGORIES: [&str; 4] = ["Avg (ms)", "P90 (ms)", "P99 (ms)", "Req/s"];

pub const PRIMARY_COLOR: RGBColor = RGBColor(0xde, 0xa5, 0x84);
pub const SECONDARY_COLOR: RGBColor = RGBColor(0x53, 0x82, 0xa1);

// 6.4 x 4.8 in at 200 dpi
const COMPARISON_SIZE: (u32, u32) = (1280, 960);
const DASHBOARD_SIZE: (u32, u32) = (1280, 1920);

const BAR_WIDTH: f64 = 0.35;

type DrawResult = std::result::Result<(), Box<dyn Error>>;

/// Output stage of the pipeline. Both calls receive fully computed
/// subject reports; nothing is written before the data is ready.
pub trait ChartRenderer {
    /// Grouped latency/throughput bars.
    fn render_comparison(&mut self, path: &Path, a: &SubjectReport, b: &SubjectReport) -> Result<()>;

    /// Bars plus CPU and memory time series. Only called when both
    /// subjects carry resource samples.
    fn render_dashboard(&mut self, path: &Path, a: &SubjectReport, b: &SubjectReport) -> Result<()>;
}

/// Renders charts to PNG files with plotters' bitmap backend.
#[derive(Debug, Clone, Copy)]
pub struct PngRenderer {
    pub comparison_size: (u32, u32),
    pub dashboard_size: (u32, u32),
}

impl Default for PngRenderer {
    fn default() -> Self {
        PngRenderer { comparison_size: COMPARISON_SIZE, dashboard_size: DASHBOARD_SIZE }
    }
}

impl ChartRenderer for PngRenderer {
    fn render_comparison(&mut self, path: &Path, a: &SubjectReport, b: &SubjectReport) -> Result<()> {
        let root = BitMapBackend::new(path, self.comparison_size).into_drawing_area();
        draw_comparison_page(&root, a, b).map_err(chart_err)
    }

    fn render_dashboard(&mut self, path: &Path, a: &SubjectReport, b: &SubjectReport) -> Result<()> {
        let root = BitMapBackend::new(path, self.dashboard_size).into_drawing_area();
        draw_dashboard_page(&root, a, b).map_err(chart_err)
    }
}

fn chart_err(e: Box<dyn Error>) -> AnalyzeError {
    AnalyzeError::Chart(e.to_string())
}

fn draw_comparison_page(root: &DrawingArea<BitMapBackend, Shift>, a: &SubjectReport, b: &SubjectReport) -> DrawResult {
    root.fill(&WHITE)?;
    draw_bars(root, a, b)?;
    root.present()?;
    Ok(())
}

fn draw_dashboard_page(root: &DrawingArea<BitMapBackend, Shift>, a: &SubjectReport, b: &SubjectReport) -> DrawResult {
    root.fill(&WHITE)?;
    let panels = root.split_evenly((3, 1));

    draw_bars(&panels[0], a, b)?;
    draw_resource_panel(&panels[1], "CPU Usage (%)", "CPU %", a, b, |s| s.cpu_perc)?;
    draw_resource_panel(&panels[2], "Memory Usage (MiB)", "MiB", a, b, |s| s.mem_mib)?;

    root.present()?;
    Ok(())
}

/// Map an x axis value back onto its category name. Only whole
/// positions get a label; everything in between stays blank.
fn category_label(x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    CATEGORIES.get(idx as usize).map(|s| s.to_string()).unwrap_or_default()
}

/// Upper bound of an axis: `peak` plus headroom, or 1 when there is
/// nothing positive to show so the range never collapses.
fn axis_max(peak: f64, headroom: f64) -> f64 {
    if peak > 0.0 { peak * headroom } else { 1.0 }
}

/// Bar corners for one subject, shifted by `offset` from each category center.
fn bar_rects(values: [f64; 4], offset: f64) -> [[(f64, f64); 2]; 4] {
    let mut rects = [[(0.0, 0.0); 2]; 4];
    for (i, (rect, v)) in rects.iter_mut().zip(values).enumerate() {
        let center = i as f64 + offset;
        *rect = [(center - BAR_WIDTH / 2.0, 0.0), (center + BAR_WIDTH / 2.0, v)];
    }
    rects
}

/// `(t, value)` points of one subject, ordered by time.
fn resource_points(subject: &SubjectReport, value: fn(&ResourceSample) -> f64) -> Vec<(f64, f64)> {
    let mut points: Vec<(f64, f64)> = subject
        .resources
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|s| (s.timestamp, value(s)))
        .collect();
    points.sort_by(|l, r| l.0.total_cmp(&r.0));
    points
}

fn draw_bars(area: &DrawingArea<BitMapBackend, Shift>, a: &SubjectReport, b: &SubjectReport) -> DrawResult {
    let peak = a
        .summary
        .values()
        .into_iter()
        .chain(b.summary.values())
        .fold(0.0, f64::max);
    let y_max = axis_max(peak, 1.15);

    let mut chart = ChartBuilder::on(area)
        .caption(format!("{} vs {} — Performance Comparison", a.label, b.label), ("sans-serif", 28))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5f64..(CATEGORIES.len() as f64 - 0.5), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(CATEGORIES.len() + 1)
        .x_label_formatter(&|x| category_label(*x))
        .y_desc("Value")
        .draw()?;

    for (subject, color, offset) in [
        (a, PRIMARY_COLOR, -BAR_WIDTH / 2.0),
        (b, SECONDARY_COLOR, BAR_WIDTH / 2.0),
    ] {
        chart
            .draw_series(
                bar_rects(subject.summary.values(), offset)
                    .into_iter()
                    .map(move |corners| Rectangle::new(corners, color.filled())),
            )?
            .label(subject.label.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}

fn draw_resource_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    caption: &str,
    y_desc: &str,
    a: &SubjectReport,
    b: &SubjectReport,
    value: fn(&ResourceSample) -> f64,
) -> DrawResult {
    let series: Vec<(&str, RGBColor, Vec<(f64, f64)>)> = [(a, PRIMARY_COLOR), (b, SECONDARY_COLOR)]
        .into_iter()
        .map(|(subject, color)| (subject.label.as_str(), color, resource_points(subject, value)))
        .collect();

    let x_peak = series.iter().flat_map(|(_, _, p)| p.iter().map(|pt| pt.0)).fold(0.0, f64::max);
    let y_peak = series.iter().flat_map(|(_, _, p)| p.iter().map(|pt| pt.1)).fold(0.0, f64::max);
    let x_max = axis_max(x_peak, 1.0);
    let y_max = axis_max(y_peak, 1.1);

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 24))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_labels(10)
        .x_desc("Time (s)")
        .y_desc(y_desc)
        .draw()?;

    for (label, color, points) in series {
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 25, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;

    Ok(())
}
