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
    # docker_stats.rs

    Container resource log reader.

    Expects a CSV with (at least) these header columns, as written by a
    `docker stats --no-stream` sampling loop:

    ```text
    timestamp,cpu_perc,mem_usage
    1714557600,12.34%,65.3MiB / 7.77GiB
    ```

    - `cpu_perc` has its trailing `%` stripped.
    - `mem_usage` keeps only the used part (before `/`) and is converted to MiB.
    - `timestamp` may be epoch seconds, RFC 3339, or `YYYY-MM-DD HH:MM:SS[.fff]`.
    - The table is normalized so the earliest sample sits at t = 0.
*/

use std::path::Path;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AnalyzeError, Result};

/// One resource sample after unit conversion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResourceSample {
    /// Seconds since the first sample once normalized.
    pub timestamp: f64,
    pub cpu_perc: f64,
    pub mem_mib: f64,
}

#[derive(Deserialize)]
struct CsvRow {
    timestamp: String,
    cpu_perc: String,
    mem_usage: String,
}

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
];

/// Load a docker stats CSV into a normalized sample table.
pub fn load_resource_stats(path: impl AsRef<Path>) -> Result<Vec<ResourceSample>> {
    let path = path.as_ref();
    let csv_err = |source| AnalyzeError::Csv { path: path.to_path_buf(), source };

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(csv_err)?;

    let mut samples = Vec::new();
    for (idx, row) in rdr.deserialize::<CsvRow>().enumerate() {
        let row = row.map_err(csv_err)?;
        let bad = |field: &'static str, value: &str| AnalyzeError::ResourceParse {
            path: path.to_path_buf(),
            row: idx + 1,
            field,
            value: value.to_string(),
        };

        let timestamp = parse_timestamp(&row.timestamp).ok_or_else(|| bad("timestamp", &row.timestamp))?;
        let cpu_perc = parse_cpu(&row.cpu_perc).ok_or_else(|| bad("cpu_perc", &row.cpu_perc))?;
        let mem_mib = parse_mem_usage(&row.mem_usage).ok_or_else(|| bad("mem_usage", &row.mem_usage))?;

        samples.push(ResourceSample { timestamp, cpu_perc, mem_mib });
    }

    normalize_timestamps(&mut samples);
    Ok(samples)
}

/// Parse a CPU cell such as `"12.34%"`.
pub fn parse_cpu(s: &str) -> Option<f64> {
    let s = s.trim();
    let s = s.strip_suffix('%').unwrap_or(s);
    parse_number(s)
}

/// Parse the used part of a `"<used> / <total>"` memory cell into MiB.
/// A value without a GiB/MiB/KiB suffix is taken as MiB already.
pub fn parse_mem_usage(s: &str) -> Option<f64> {
    let used = s.split('/').next()?.trim();

    if let Some(v) = used.strip_suffix("GiB") {
        parse_number(v).map(|v| v * 1024.0)
    } else if let Some(v) = used.strip_suffix("MiB") {
        parse_number(v)
    } else if let Some(v) = used.strip_suffix("KiB") {
        parse_number(v).map(|v| v / 1024.0)
    } else {
        parse_number(used)
    }
}

/// Parse a timestamp cell into seconds.
pub fn parse_timestamp(s: &str) -> Option<f64> {
    let s = s.trim();
    if let Some(v) = parse_number(s) {
        return Some(v);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(epoch_secs(&dt));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|ndt| epoch_secs(&Utc.from_utc_datetime(&ndt)))
}

/// Shift every timestamp so the smallest one becomes 0.
pub fn normalize_timestamps(samples: &mut [ResourceSample]) {
    let Some(min) = samples.iter().map(|s| s.timestamp).reduce(f64::min) else {
        return;
    };
    for s in samples.iter_mut() {
        s.timestamp -= min;
    }
}

fn epoch_secs<Tz: TimeZone>(dt: &DateTime<Tz>) -> f64 {
    dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) / 1e9
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
