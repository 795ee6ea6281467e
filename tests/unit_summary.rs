use loadtest_compare::summary::{Summary, percentile, summarize};

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_percentiles_one_to_hundred() {
    let data: Vec<f64> = (1..=100u32).map(f64::from).collect();
    let s = summarize(&data, 100.0, 10.0);
    assert!(close(s.avg, 50.5), "avg = {}", s.avg);
    assert!(close(s.p90, 90.1), "p90 = {}", s.p90);
    assert!(close(s.p99, 99.01), "p99 = {}", s.p99);
    assert!(close(s.reqs_per_sec, 10.0));
}

#[test]
fn test_unsorted_input_matches_sorted() {
    let sorted = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
    let shuffled = [7.0, 3.0, 10.0, 1.0, 5.0, 9.0, 2.0, 8.0, 6.0, 4.0];
    assert_eq!(summarize(&sorted, 3.0, 1.0), summarize(&shuffled, 3.0, 1.0));
    assert!(close(percentile(&sorted, 90.0), 9.1));
}

#[test]
fn test_mean_is_arithmetic_mean() {
    let data = [12.5, 0.25, 7.0, 100.0, 3.125];
    let expected = data.iter().sum::<f64>() / data.len() as f64;
    assert_eq!(summarize(&data, 0.0, 30.0).avg, expected);
}

#[test]
fn test_empty_series_is_all_zero() {
    for (reqs, duration) in [(0.0, 30.0), (500.0, 30.0), (1e9, 0.5)] {
        assert_eq!(summarize(&[], reqs, duration), Summary::default());
    }
    assert_eq!(Summary::default().values(), [0.0; 4]);
}

#[test]
fn test_throughput_linear_in_requests() {
    let data = [5.0, 10.0, 15.0];
    let one = summarize(&data, 120.0, 30.0);
    let two = summarize(&data, 240.0, 30.0);
    assert_eq!(two.reqs_per_sec, 2.0 * one.reqs_per_sec);
    assert_eq!((one.avg, one.p90, one.p99), (two.avg, two.p90, two.p99));
}

#[test]
fn test_single_sample() {
    let s = summarize(&[100.0], 5.0, 10.0);
    assert_eq!(s, Summary { avg: 100.0, p90: 100.0, p99: 100.0, reqs_per_sec: 0.5 });
}
