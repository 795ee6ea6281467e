use std::fs;

use loadtest_compare::docker_stats::{ResourceSample, load_resource_stats};
use loadtest_compare::error::AnalyzeError;

fn write_csv(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("stats.csv");
    fs::write(&path, content).unwrap();
    (dir, path)
}

#[test]
fn test_load_and_normalize() {
    let (_dir, path) = write_csv(
        "timestamp,name,cpu_perc,mem_usage,net_io\n\
         1714557602,api,12.34%,65.3MiB / 7.77GiB,1kB / 2kB\n\
         1714557600,api,0.50%,1GiB / 8GiB,1kB / 2kB\n\
         1714557604,api,100%,512KiB / 1GiB,1kB / 2kB\n",
    );

    let rows = load_resource_stats(&path).unwrap();
    assert_eq!(
        rows,
        vec![
            ResourceSample { timestamp: 2.0, cpu_perc: 12.34, mem_mib: 65.3 },
            ResourceSample { timestamp: 0.0, cpu_perc: 0.5, mem_mib: 1024.0 },
            ResourceSample { timestamp: 4.0, cpu_perc: 100.0, mem_mib: 0.5 },
        ]
    );
    let min = rows.iter().map(|r| r.timestamp).fold(f64::INFINITY, f64::min);
    assert_eq!(min, 0.0);
}

#[test]
fn test_iso_timestamps() {
    let (_dir, path) = write_csv(
        "timestamp,cpu_perc,mem_usage\n\
         2024-05-01T10:00:00Z,1%,10MiB / 1GiB\n\
         2024-05-01T10:00:05Z,2%,20MiB / 1GiB\n",
    );
    let rows = load_resource_stats(&path).unwrap();
    let ts: Vec<f64> = rows.iter().map(|r| r.timestamp).collect();
    assert_eq!(ts, vec![0.0, 5.0]);
}

#[test]
fn test_header_only_is_empty() {
    let (_dir, path) = write_csv("timestamp,cpu_perc,mem_usage\n");
    assert!(load_resource_stats(&path).unwrap().is_empty());
}

#[test]
fn test_bad_cpu_names_file_and_row() {
    let (_dir, path) = write_csv(
        "timestamp,cpu_perc,mem_usage\n\
         1,1%,10MiB / 1GiB\n\
         2,--,10MiB / 1GiB\n",
    );
    match load_resource_stats(&path) {
        Err(AnalyzeError::ResourceParse { path: p, row, field, value }) => {
            assert_eq!(p, path);
            assert_eq!(row, 2);
            assert_eq!(field, "cpu_perc");
            assert_eq!(value, "--");
        }
        other => panic!("expected ResourceParse, got {other:?}"),
    }
}

#[test]
fn test_bad_mem_is_reported() {
    let (_dir, path) = write_csv("timestamp,cpu_perc,mem_usage\n1,1%,lots / 1GiB\n");
    let err = load_resource_stats(&path).unwrap_err();
    assert!(matches!(err, AnalyzeError::ResourceParse { row: 1, field: "mem_usage", .. }));
    assert!(err.to_string().contains("row 1"));
}

#[test]
fn test_missing_column_is_csv_error() {
    let (_dir, path) = write_csv("timestamp,cpu_perc\n1,1%\n");
    assert!(matches!(load_resource_stats(&path), Err(AnalyzeError::Csv { .. })));
}
