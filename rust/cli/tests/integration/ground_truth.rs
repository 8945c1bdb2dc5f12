use crate::helpers::{path_str, run_cli};
use stagedice_engine::logger::GroundTruthCase;

#[test]
fn truth_then_verify_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truth.json");
    let res = run_cli(&["truth", "--output", path_str(&path)]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("Wrote 4 case(s)"));

    let res = run_cli(&["verify", "--input", path_str(&path)]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("Verified: 4 case(s), 0 mismatch(es)"));
}

#[test]
fn truth_defaults_match_known_values() {
    let res = run_cli(&["truth"]);
    assert_eq!(res.exit_code, 0);
    let cases: Vec<GroundTruthCase> = serde_json::from_str(&res.stdout).unwrap();
    let by_input = |input: [i64; 4]| cases.iter().find(|c| c.input == input).unwrap();

    // player leads 10-5 with one d6 each: house must out-roll by at least 6
    let lead = by_input([10, 5, 1, 6]);
    assert!((lead.expected_probs.win - 35.0 / 36.0).abs() < 1e-12);

    let trail = by_input([5, 10, 1, 6]);
    assert!(trail.expected_probs.win.abs() < 1e-12);
    assert!(trail.expected_entropy < 1e-12);

    let even = by_input([7, 7, 2, 6]);
    assert!(even.expected_probs.win < 0.5);
    assert!(even.expected_probs.loss > 0.5);
}

#[test]
fn truth_accepts_negative_case_totals() {
    let res = run_cli(&["truth", "--case", "-3,0,2,4", "--case", "0,0,1,2"]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    let cases: Vec<GroundTruthCase> = serde_json::from_str(&res.stdout).unwrap();
    assert_eq!(cases.len(), 2);
    assert_eq!(cases[0].input, [-3, 0, 2, 4]);
    assert_eq!(cases[1].expected_probs.win, 0.25);
}

#[test]
fn verify_reports_tampered_case_and_exits_two() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truth.json");
    let mut cases = vec![
        GroundTruthCase::compute([0, 0, 3, 6]).unwrap(),
        GroundTruthCase::compute([7, 7, 2, 6]).unwrap(),
        GroundTruthCase::compute([0, 0, 1, 2]).unwrap(),
    ];
    cases[2].expected_entropy += 0.001;
    std::fs::write(&path, serde_json::to_string_pretty(&cases).unwrap()).unwrap();

    let res = run_cli(&["verify", "--input", path_str(&path)]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stdout.contains("3 case(s), 1 mismatch(es)"));
    assert!(res.stderr.contains("Case 3: entropy mismatch"));
}

#[test]
fn verify_reads_zstd_compressed_vectors() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truth.json.zst");
    let cases = vec![GroundTruthCase::compute([2, 1, 2, 6]).unwrap()];
    let json = serde_json::to_vec(&cases).unwrap();
    let compressed = zstd::stream::encode_all(json.as_slice(), 0).unwrap();
    std::fs::write(&path, compressed).unwrap();

    let res = run_cli(&["verify", "--input", path_str(&path)]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
}

#[test]
fn verify_missing_file_exits_two() {
    let res = run_cli(&["verify", "--input", "/nonexistent/truth.json"]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Failed to read"));
}
