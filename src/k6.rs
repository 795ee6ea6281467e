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
    # k6.rs

    Reader for k6 line-delimited JSON output (`k6 run --out json=<file>`).

    - One JSON object per line, parsed independently.
    - Only `"type": "Point"` samples are considered.
    - `http_req_duration` values are collected into the latency series (ms).
    - `http_reqs` values are summed into the request count.
    - Lines that are not JSON objects (including invalid UTF-8), or records
      with any other shape, are skipped.
*/

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{AnalyzeError, Result};

pub const POINT_TYPE: &str = "Point";
pub const DURATION_METRIC: &str = "http_req_duration";
pub const REQUESTS_METRIC: &str = "http_reqs";

/// Latency samples and total request count extracted from one k6 run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadResults {
    /// `http_req_duration` samples in input line order (ms).
    pub durations: Vec<f64>,
    /// Sum of all `http_reqs` samples.
    pub requests: f64,
}

// Loose view of a k6 output line. Every field is optional so that
// metric definitions and other record kinds deserialize cleanly and
// are then filtered out.
#[derive(Deserialize)]
struct K6Record {
    #[serde(rename = "type")]
    kind: Option<String>,
    metric: Option<String>,
    data: Option<Value>,
}

impl K6Record {
    /// `data.value` when `data` is an object and `value` a number.
    fn numeric_value(&self) -> Option<f64> {
        self.data.as_ref()?.get("value")?.as_f64()
    }
}

/// Parse a k6 JSON output file.
/// Failing to open or read the file is an error; bad lines are not.
pub fn parse_k6_json(path: impl AsRef<Path>) -> Result<LoadResults> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| AnalyzeError::io(path, e))?;
    parse_k6_reader(BufReader::new(file)).map_err(|e| AnalyzeError::io(path, e))
}

/// Parse k6 line-delimited JSON from any buffered reader.
pub fn parse_k6_reader<R: BufRead>(mut reader: R) -> std::io::Result<LoadResults> {
    let mut results = LoadResults::default();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }

        // Records are JSON objects; arrays would otherwise map positionally.
        if buf.trim_ascii_start().first() != Some(&b'{') {
            continue;
        }
        let record: K6Record = match serde_json::from_slice(&buf) {
            Ok(r) => r,
            Err(_) => continue,
        };
        if record.kind.as_deref() != Some(POINT_TYPE) {
            continue;
        }
        let Some(value) = record.numeric_value() else {
            continue;
        };

        match record.metric.as_deref() {
            Some(DURATION_METRIC) => results.durations.push(value),
            Some(REQUESTS_METRIC) => results.requests += value,
            _ => {}
        }
    }

    Ok(results)
}
