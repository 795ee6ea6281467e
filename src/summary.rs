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

//! Latency / throughput summary for one load-test run.

use std::fmt;

use serde::Serialize;

/// Mean, p90 and p99 latency (ms) plus throughput (req/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    pub avg: f64,
    pub p90: f64,
    pub p99: f64,
    pub reqs_per_sec: f64,
}

impl Summary {
    /// Values in chart category order: avg, p90, p99, req/s.
    pub fn values(&self) -> [f64; 4] {
        [self.avg, self.p90, self.p99, self.reqs_per_sec]
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{avg: {}, p90: {}, p99: {}, reqs_per_sec: {}}}",
            self.avg, self.p90, self.p99, self.reqs_per_sec
        )
    }
}

/// Summarize a latency series.
///
/// An empty series yields the all-zero summary whatever `requests` is.
/// `test_duration_secs` must be positive; `Config::validate` enforces it.
pub fn summarize(durations: &[f64], requests: f64, test_duration_secs: f64) -> Summary {
    if durations.is_empty() {
        return Summary::default();
    }

    let avg = durations.iter().sum::<f64>() / durations.len() as f64;

    let mut sorted = durations.to_vec();
    sorted.sort_by(f64::total_cmp);

    Summary {
        avg,
        p90: percentile(&sorted, 90.0),
        p99: percentile(&sorted, 99.0),
        reqs_per_sec: requests / test_duration_secs,
    }
}

/// Percentile of an ascending slice, linearly interpolated between the
/// two closest ranks (`rank = p / 100 * (n - 1)`).
pub fn percentile(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if upper >= sorted.len() {
        return sorted[sorted.len() - 1];
    }

    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentile_endpoints() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&data, 0.0), 1.0);
        assert_eq!(percentile(&data, 100.0), 4.0);
        assert_eq!(percentile(&data, 50.0), 2.5);
        assert_eq!(percentile(&[], 90.0), 0.0);
    }

    #[test]
    fn display_format() {
        let s = Summary { avg: 1.0, p90: 2.5, p99: 99.0100001, reqs_per_sec: 0.5 };
        assert_eq!(s.to_string(), "{avg: 1, p90: 2.5, p99: 99.0100001, reqs_per_sec: 0.5}");
    }
}
