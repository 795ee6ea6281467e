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

//! Error type shared by every stage of the comparison pipeline.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AnalyzeError>;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A cpu/mem/timestamp cell in a docker stats file could not be parsed.
    /// `row` is the 1-based data row (header excluded).
    #[error("{}: row {row}: invalid {field} value {value:?}", path.display())]
    ResourceParse {
        path: PathBuf,
        row: usize,
        field: &'static str,
        value: String,
    },

    #[error("test duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f64),

    #[error("no test duration given (use --duration or test_duration_secs in the config file)")]
    MissingDuration,

    #[error("failed to parse config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("chart rendering failed: {0}")]
    Chart(String),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalyzeError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AnalyzeError::Io { path: path.into(), source }
    }
}
