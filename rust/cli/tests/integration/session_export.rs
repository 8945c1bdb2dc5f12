use crate::helpers::{clear_env, path_str, run_cli};
use serial_test::serial;
use stagedice_engine::logger::{TrialOutcome, TrialRecord};
use stagedice_engine::session::{CalibratedPolicy, Session, SessionConfig};

fn read_records(path: &std::path::Path) -> Vec<TrialRecord> {
    std::fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect()
}

#[test]
#[serial]
fn sim_is_reproducible_for_a_seed() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let a = dir.path().join("a.jsonl");
    let b = dir.path().join("b.jsonl");
    assert_eq!(
        run_cli(&["sim", "--trials", "5", "--seed", "99", "--output", path_str(&a)]).exit_code,
        0
    );
    assert_eq!(
        run_cli(&["sim", "--trials", "5", "--seed", "99", "--output", path_str(&b)]).exit_code,
        0
    );

    let mut ra = read_records(&a);
    let mut rb = read_records(&b);
    for r in ra.iter_mut().chain(rb.iter_mut()) {
        r.ts = None;
    }
    assert_eq!(ra, rb);
    assert_eq!(ra.len(), 5);
}

#[test]
#[serial]
fn sim_records_are_consistent() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("trials.jsonl");
    let res = run_cli(&["sim", "--trials", "6", "--seed", "2024", "--output", path_str(&log)]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("Simulated: 6 trials"));

    let records = read_records(&log);
    for pair in records.windows(2) {
        assert_eq!(pair[0].wealth_end, pair[1].wealth_start);
        assert_eq!(pair[0].participant, pair[1].participant);
    }
    for rec in &records {
        let last = rec.history.last().unwrap();
        let won = last.p_sum_after_roll.unwrap() > last.h_sum_after_roll.unwrap();
        assert_eq!(rec.outcome == TrialOutcome::Win, won);
        for snap in &rec.history {
            assert!(snap.ground_truth_probs.is_normalized());
            assert_eq!(snap.ground_truth_probs.push, 0.0);
            let brier = snap.brier_score.unwrap();
            assert!((snap.accuracy_score.unwrap() - (1.0 - brier)).abs() < 1e-12);
        }
    }
}

#[test]
#[serial]
fn sim_then_export_csv() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("trials.jsonl");
    let csv = dir.path().join("export").join("trials.csv");
    assert_eq!(
        run_cli(&["sim", "--trials", "3", "--seed", "5", "--output", path_str(&log)]).exit_code,
        0
    );

    let res = run_cli(&[
        "export",
        "--input",
        path_str(&log),
        "--output",
        path_str(&csv),
    ]);
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    assert!(res.stdout.contains("Exported 9 row(s)"));

    let text = std::fs::read_to_string(&csv).unwrap();
    let mut lines = text.lines();
    let header = lines.next().unwrap();
    assert!(header.starts_with("participant_number,trial_id,stage,outcome"));
    assert!(header.ends_with("mean_accuracy,performance_reward,total_payment"));
    let columns: Vec<&str> = header.split(',').collect();
    let payment_col = columns.iter().position(|c| *c == "total_payment").unwrap();
    let reward_col = columns.iter().position(|c| *c == "performance_reward").unwrap();

    let mut session = Session::new(
        SessionConfig {
            trials: 3,
            seed: 5,
            ..SessionConfig::default()
        },
        CalibratedPolicy,
    )
    .unwrap();
    session.play_all().unwrap();
    let summary = session.summary();

    let rows: Vec<Vec<&str>> = lines.map(|l| l.split(',').collect()).collect();
    assert_eq!(rows.len(), 9);
    for row in rows {
        let payment: f64 = row[payment_col].parse().unwrap();
        let reward: f64 = row[reward_col].parse().unwrap();
        assert_eq!(payment, summary.total_payment);
        assert_eq!(reward, summary.performance_reward);
    }
}

#[test]
fn export_rejects_corrupt_log() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("bad.jsonl");
    std::fs::write(&log, "{\"participant\": \"P-1\"}\n").unwrap();
    let res = run_cli(&[
        "export",
        "--input",
        path_str(&log),
        "--output",
        path_str(&dir.path().join("out.csv")),
    ]);
    assert_eq!(res.exit_code, 2);
    assert!(res.stderr.contains("Invalid record at line 1"));
}
