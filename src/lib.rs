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

//! # loadtest_compare
//!
//! Compares two HTTP service load-test runs side by side:
//! k6 JSON output gives latency and throughput, optional `docker stats`
//! CSV logs give CPU and memory over time. Results are printed and
//! charted to PNG.

pub mod analyze;
pub mod chart;
pub mod config;
pub mod docker_stats;
pub mod error;
pub mod k6;
pub mod summary;

pub use analyze::{Report, SubjectReport, run, run_with};
pub use config::{Config, SubjectConfig};
pub use error::{AnalyzeError, Result};
pub use summary::{Summary, summarize};
