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
    # config.rs

    Run configuration: the two subjects being compared, the load-test
    duration used for throughput, and where charts go.

    A config can be loaded from TOML:

    ```toml
    test_duration_secs = 30
    output_dir = "out"

    [primary]
    label = "Rust"
    results = "rust_results.json"
    stats = "rust_docker_stats.csv"

    [secondary]
    label = "Spring Boot"
    results = "spring_results.json"
    stats = "spring_docker_stats.csv"
    ```
*/

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AnalyzeError, Result};

pub const COMPARISON_CHART: &str = "comparison.png";
pub const DASHBOARD_CHART: &str = "comparison_dashboard.png";

/// One side of the comparison.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubjectConfig {
    pub label: String,
    /// k6 line-delimited JSON output.
    pub results: PathBuf,
    /// docker stats CSV; the resource stage is skipped without it.
    #[serde(default)]
    pub stats: Option<PathBuf>,
}

impl SubjectConfig {
    pub fn new(label: impl Into<String>, results: impl Into<PathBuf>) -> Self {
        SubjectConfig { label: label.into(), results: results.into(), stats: None }
    }

    pub fn with_stats(mut self, stats: impl Into<PathBuf>) -> Self {
        self.stats = Some(stats.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub primary: SubjectConfig,
    pub secondary: SubjectConfig,
    /// Length of the measured load-test window. No default: it has to
    /// match the k6 run that produced the results.
    pub test_duration_secs: f64,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_true")]
    pub resource_stats: bool,
    #[serde(default)]
    pub summary_json: Option<PathBuf>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_true() -> bool {
    true
}

impl Config {
    pub fn new(primary: SubjectConfig, secondary: SubjectConfig, test_duration_secs: f64) -> Self {
        Config {
            primary,
            secondary,
            test_duration_secs,
            output_dir: default_output_dir(),
            resource_stats: true,
            summary_json: None,
        }
    }

    /// Default subject pair: Rust vs Spring Boot with the usual file names.
    pub fn rust_vs_spring(test_duration_secs: f64) -> Self {
        Config::new(
            SubjectConfig::new("Rust", "rust_results.json").with_stats("rust_docker_stats.csv"),
            SubjectConfig::new("Spring Boot", "spring_results.json")
                .with_stats("spring_docker_stats.csv"),
            test_duration_secs,
        )
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| AnalyzeError::io(path, e))?;
        toml::from_str(&content).map_err(|source| AnalyzeError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject settings that would make the summaries meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(self.test_duration_secs.is_finite() && self.test_duration_secs > 0.0) {
            return Err(AnalyzeError::InvalidDuration(self.test_duration_secs));
        }
        Ok(())
    }

    pub fn comparison_path(&self) -> PathBuf {
        self.output_dir.join(COMPARISON_CHART)
    }

    pub fn dashboard_path(&self) -> PathBuf {
        self.output_dir.join(DASHBOARD_CHART)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            test_duration_secs = 30

            [primary]
            label = "A"
            results = "a.json"

            [secondary]
            label = "B"
            results = "b.json"
            stats = "b.csv"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.test_duration_secs, 30.0);
        assert_eq!(cfg.output_dir, PathBuf::from("."));
        assert!(cfg.resource_stats);
        assert_eq!(cfg.primary.stats, None);
        assert_eq!(cfg.secondary.stats, Some(PathBuf::from("b.csv")));
        assert_eq!(cfg.comparison_path(), PathBuf::from("./comparison.png"));
    }

    #[test]
    fn toml_rejects_unknown_keys() {
        let res: std::result::Result<Config, _> = toml::from_str(
            r#"
            test_duration_secs = 30
            dpi = 200
            [primary]
            label = "A"
            results = "a.json"
            [secondary]
            label = "B"
            results = "b.json"
            "#,
        );
        assert!(res.is_err());
    }

    #[test]
    fn validate_duration() {
        assert!(Config::rust_vs_spring(30.0).validate().is_ok());
        for bad in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Config::rust_vs_spring(bad).validate(),
                Err(AnalyzeError::InvalidDuration(_))
            ));
        }
    }
}
