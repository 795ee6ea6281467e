// loadtest_compare - Load Test Results Comparison & Charting (Main Entry)
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
    # main.rs

    Command-line frontend for loadtest_compare.

    ```text
    loadtest_compare -d 30                          # Rust vs Spring Boot, default file names
    loadtest_compare -c compare.toml                # everything from a config file
    loadtest_compare -c compare.toml -o out/ -d 45  # config file with overrides
    ```

    After a run, `comparison.png` (and `comparison_dashboard.png` when both
    docker stats files exist) are in the output directory.
*/

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use loadtest_compare::{AnalyzeError, Config, Result};

#[derive(Parser, Debug)]
#[command(name = "loadtest_compare", version, about = "Compare two k6 load test runs and chart the results")]
struct Args {
    /// TOML config file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Measured load test duration in seconds, used for req/s
    #[arg(short, long)]
    duration: Option<f64>,

    /// Label of the first subject [default: Rust]
    #[arg(long)]
    primary_label: Option<String>,

    /// k6 JSON output of the first subject [default: rust_results.json]
    #[arg(long)]
    primary_results: Option<PathBuf>,

    /// docker stats CSV of the first subject [default: rust_docker_stats.csv]
    #[arg(long)]
    primary_stats: Option<PathBuf>,

    /// Label of the second subject [default: Spring Boot]
    #[arg(long)]
    secondary_label: Option<String>,

    /// k6 JSON output of the second subject [default: spring_results.json]
    #[arg(long)]
    secondary_results: Option<PathBuf>,

    /// docker stats CSV of the second subject [default: spring_docker_stats.csv]
    #[arg(long)]
    secondary_stats: Option<PathBuf>,

    /// Directory for the chart images [default: .]
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Skip the CPU/memory dashboard even if stats files exist
    #[arg(long)]
    no_resource_stats: bool,

    /// Also write the summaries as JSON to this file
    #[arg(long)]
    summary_json: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::rust_vs_spring(self.duration.ok_or(AnalyzeError::MissingDuration)?),
        };

        if let Some(d) = self.duration {
            cfg.test_duration_secs = d;
        }
        if let Some(v) = self.primary_label {
            cfg.primary.label = v;
        }
        if let Some(v) = self.primary_results {
            cfg.primary.results = v;
        }
        if let Some(v) = self.primary_stats {
            cfg.primary.stats = Some(v);
        }
        if let Some(v) = self.secondary_label {
            cfg.secondary.label = v;
        }
        if let Some(v) = self.secondary_results {
            cfg.secondary.results = v;
        }
        if let Some(v) = self.secondary_stats {
            cfg.secondary.stats = Some(v);
        }
        if let Some(v) = self.output_dir {
            cfg.output_dir = v;
        }
        if self.no_resource_stats {
            cfg.resource_stats = false;
        }
        if let Some(v) = self.summary_json {
            cfg.summary_json = Some(v);
        }
        Ok(cfg)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let result = args.into_config().and_then(|cfg| loadtest_compare::run(&cfg));

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
