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
    # analyze.rs

    Comparison pipeline:

    1. Read both k6 result files and summarize them.
    2. Print one summary line per subject.
    3. Load docker stats for both subjects if available.
    4. Write `comparison.png`, plus `comparison_dashboard.png` when resource stats were loaded.
    5. Optionally write the whole report as JSON.
*/

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::chart::{ChartRenderer, PngRenderer};
use crate::config::{Config, SubjectConfig};
use crate::docker_stats::{self, ResourceSample};
use crate::error::{AnalyzeError, Result};
use crate::k6;
use crate::summary::{Summary, summarize};

/// Everything computed for one subject.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectReport {
    pub label: String,
    pub summary: Summary,
    /// Number of latency samples behind `summary`. Zero means the
    /// all-zero summary is "no data", not a measured result.
    pub samples: usize,
    pub requests: f64,
    #[serde(skip)]
    pub resources: Option<Vec<ResourceSample>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub test_duration_secs: f64,
    pub primary: SubjectReport,
    pub secondary: SubjectReport,
    /// Chart files written, in order.
    pub charts: Vec<PathBuf>,
}

/// Run the comparison and write PNG charts.
pub fn run(config: &Config) -> Result<Report> {
    run_with(config, &mut PngRenderer::default())
}

/// Run the comparison with a caller-supplied renderer.
pub fn run_with<R: ChartRenderer>(config: &Config, renderer: &mut R) -> Result<Report> {
    config.validate()?;
    info!(
        primary = %config.primary.label,
        secondary = %config.secondary.label,
        duration_secs = config.test_duration_secs,
        "Comparing load test results"
    );

    let mut primary = analyze_subject(&config.primary, config.test_duration_secs)?;
    let mut secondary = analyze_subject(&config.secondary, config.test_duration_secs)?;

    println!("{} Summary: {}", primary.label, primary.summary);
    println!("{} Summary: {}", secondary.label, secondary.summary);

    if config.resource_stats {
        if let Some((a, b)) = load_resources(&config.primary, &config.secondary)? {
            primary.resources = Some(a);
            secondary.resources = Some(b);
        }
    } else {
        debug!("Resource stats disabled by configuration");
    }

    fs::create_dir_all(&config.output_dir).map_err(|e| AnalyzeError::io(&config.output_dir, e))?;
    let mut charts = Vec::new();

    let path = config.comparison_path();
    renderer.render_comparison(&path, &primary, &secondary)?;
    println!("Saved chart as {}", path.display());
    charts.push(path);

    if primary.resources.is_some() && secondary.resources.is_some() {
        let path = config.dashboard_path();
        renderer.render_dashboard(&path, &primary, &secondary)?;
        println!("Saved chart as {}", path.display());
        charts.push(path);
    }

    let report = Report {
        test_duration_secs: config.test_duration_secs,
        primary,
        secondary,
        charts,
    };

    if let Some(json_path) = &config.summary_json {
        write_report(&report, json_path)?;
        info!(path = %json_path.display(), "Wrote summary report");
    }

    Ok(report)
}

/// Extract and summarize one subject's k6 results.
pub fn analyze_subject(subject: &SubjectConfig, test_duration_secs: f64) -> Result<SubjectReport> {
    let results = k6::parse_k6_json(&subject.results)?;
    debug!(
        subject = %subject.label,
        samples = results.durations.len(),
        requests = results.requests,
        "Parsed {}",
        subject.results.display()
    );

    if results.durations.is_empty() {
        warn!(
            subject = %subject.label,
            "No http_req_duration samples in {}, summary is all zero",
            subject.results.display()
        );
    }

    Ok(SubjectReport {
        label: subject.label.clone(),
        summary: summarize(&results.durations, results.requests, test_duration_secs),
        samples: results.durations.len(),
        requests: results.requests,
        resources: None,
    })
}

/// Load both docker stats tables, or `None` if either file is missing.
fn load_resources(
    a: &SubjectConfig,
    b: &SubjectConfig,
) -> Result<Option<(Vec<ResourceSample>, Vec<ResourceSample>)>> {
    match (existing(&a.stats), existing(&b.stats)) {
        (Some(a_path), Some(b_path)) => {
            let a_rows = docker_stats::load_resource_stats(a_path)?;
            let b_rows = docker_stats::load_resource_stats(b_path)?;
            debug!(primary = a_rows.len(), secondary = b_rows.len(), "Loaded resource samples");
            Ok(Some((a_rows, b_rows)))
        }
        _ => {
            warn!(
                "Resource stats not found ({}, {}), skipping CPU/memory charts",
                describe(&a.stats),
                describe(&b.stats)
            );
            Ok(None)
        }
    }
}

fn existing(path: &Option<PathBuf>) -> Option<&Path> {
    path.as_deref().filter(|p| p.is_file())
}

fn describe(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "not configured".to_string(),
    }
}

fn write_report(report: &Report, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| AnalyzeError::io(parent, e))?;
    }
    let file = File::create(path).map_err(|e| AnalyzeError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush().map_err(|e| AnalyzeError::io(path, e))
}
