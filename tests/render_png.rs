use loadtest_compare::chart::{ChartRenderer, PngRenderer};
use loadtest_compare::docker_stats::ResourceSample;
use loadtest_compare::{SubjectReport, Summary};

fn subject(label: &str, summary: Summary, cpu: f64) -> SubjectReport {
    SubjectReport {
        label: label.to_string(),
        summary,
        samples: 10,
        requests: 300.0,
        resources: Some(
            (0..5u32)
                .map(|i| ResourceSample { timestamp: f64::from(i), cpu_perc: cpu + f64::from(i), mem_mib: 64.0 })
                .collect(),
        ),
    }
}

// Text rendering goes through the system font stack, so this only runs
// with `cargo test --features font-tests` on a host with a sans-serif font.
#[test]
#[cfg_attr(not(feature = "font-tests"), ignore = "needs a sans-serif system font")]
fn test_renders_png_files() {
    let dir = tempfile::tempdir().unwrap();
    let a = subject("Rust", Summary { avg: 4.2, p90: 6.0, p99: 9.5, reqs_per_sec: 48.0 }, 3.0);
    let b = subject("Spring Boot", Summary { avg: 7.9, p90: 12.0, p99: 30.1, reqs_per_sec: 47.5 }, 9.0);

    let mut renderer = PngRenderer::default();
    let bars = dir.path().join("comparison.png");
    let dashboard = dir.path().join("comparison_dashboard.png");
    renderer.render_comparison(&bars, &a, &b).unwrap();
    renderer.render_dashboard(&dashboard, &a, &b).unwrap();

    // A dashboard with one empty series still gets an axis.
    let mut idle = b.clone();
    idle.resources = Some(Vec::new());
    let sparse = dir.path().join("sparse_dashboard.png");
    renderer.render_dashboard(&sparse, &a, &idle).unwrap();

    for path in [bars, dashboard, sparse] {
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
