#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PAIR_CANDIDATES: &str = r#"
[[candidates]]
id = "candidate1"
name = "First"
[candidates.scores]
C1_a = 3

[[candidates]]
id = "candidate2"
name = "Second"
[candidates.scores]
C1_a = 4
"#;

fn write_project(root: &Path, config: &str, candidates: &str) {
    fs::write(root.join("aidrank.toml"), config).expect("config should write");
    fs::write(root.join("candidates.toml"), candidates).expect("candidates should write");
}

fn single_criterion(kind: &str, program: &str) -> String {
    format!(
        r#"
{program}

[[criteria]]
code = "C1"
weight = 1.0
type = "{kind}"
aspects = ["C1_a"]
"#
    )
}

fn aidrank() -> Command {
    Command::cargo_bin("aidrank").expect("binary should compile")
}

#[test]
fn rank_orders_benefit_pair_by_descending_score() {
    let project = TempDir::new().expect("temp dir should be created");
    write_project(project.path(), &single_criterion("benefit", ""), PAIR_CANDIDATES);

    aidrank()
        .arg("rank")
        .arg(project.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("| 1 | candidate2 | Second | 0.800000 |"))
        .stdout(predicate::str::contains("| 2 | candidate1 | First | 0.600000 |"))
        .stdout(predicate::str::contains("- C1_a: 5.000000"));
}

#[test]
fn rank_orders_cost_pair_by_least_negative_score() {
    let project = TempDir::new().expect("temp dir should be created");
    write_project(project.path(), &single_criterion("cost", ""), PAIR_CANDIDATES);

    aidrank()
        .arg("rank")
        .arg(project.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("| 1 | candidate1 | First | -0.600000 |"))
        .stdout(predicate::str::contains("| 2 | candidate2 | Second | -0.800000 |"));
}

#[test]
fn rank_json_outputs_scores_and_breakdown() {
    let project = TempDir::new().expect("temp dir should be created");
    write_project(project.path(), &single_criterion("benefit", ""), PAIR_CANDIDATES);

    aidrank()
        .arg("rank")
        .arg(project.path())
        .arg("--format")
        .arg("json")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"results\""))
        .stdout(predicate::str::contains("\"avg_norm\""))
        .stdout(predicate::str::contains("\"denominator\": 5.0"));
}

#[test]
fn rank_scores_missing_assignment_as_zero_with_warning() {
    let project = TempDir::new().expect("temp dir should be created");
    write_project(
        project.path(),
        &single_criterion("benefit", ""),
        r#"
[[candidates]]
id = "present"
[candidates.scores]
C1_a = 2

[[candidates]]
id = "absent"
"#,
    );

    aidrank()
        .arg("rank")
        .arg(project.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("| 1 | present |  | 1.000000 |"))
        .stdout(predicate::str::contains("| 2 | absent |  | 0.000000 |"))
        .stdout(predicate::str::contains("[warning] Missing assignment scored as 0"));
}

#[test]
fn rank_blocks_missing_assignment_under_reject_policy() {
    let project = TempDir::new().expect("temp dir should be created");
    let config = single_criterion("benefit", "[scoring]\nmissing = \"reject\"");
    write_project(
        project.path(),
        &config,
        "[[candidates]]\nid = \"absent\"\n",
    );

    aidrank()
        .arg("rank")
        .arg(project.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("[BLOCKING] assignment.missing"));
}

#[test]
fn rank_blocks_unknown_aspect() {
    let project = TempDir::new().expect("temp dir should be created");
    write_project(
        project.path(),
        &single_criterion("benefit", ""),
        "[[candidates]]\nid = \"x\"\n[candidates.scores]\nC1_a = 1\nC9_z = 4\n",
    );

    aidrank()
        .arg("rank")
        .arg(project.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("assignment.unknown_aspect"));
}

#[test]
fn rank_fails_when_weights_do_not_sum_to_one() {
    let project = TempDir::new().expect("temp dir should be created");
    write_project(
        project.path(),
        r#"
[[criteria]]
code = "C1"
weight = 0.7
aspects = ["C1_a"]
"#,
        PAIR_CANDIDATES,
    );

    aidrank()
        .arg("rank")
        .arg(project.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("must sum to 1.0"));
}

#[test]
fn rank_fails_without_config() {
    let project = TempDir::new().expect("temp dir should be created");

    aidrank()
        .arg("rank")
        .arg(project.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn rank_with_no_candidates_prints_empty_ranking() {
    let project = TempDir::new().expect("temp dir should be created");
    write_project(project.path(), &single_criterion("benefit", ""), "");

    aidrank()
        .arg("rank")
        .arg(project.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("## Ranking\n\n- none"));
}

#[test]
fn validate_reports_no_findings_for_clean_data() {
    let project = TempDir::new().expect("temp dir should be created");
    write_project(project.path(), &single_criterion("benefit", ""), PAIR_CANDIDATES);

    aidrank()
        .arg("validate")
        .arg(project.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("validate: no findings (2 candidate(s), 1 aspect(s))"));
}

#[test]
fn validate_blocks_values_outside_option_scale() {
    let project = TempDir::new().expect("temp dir should be created");
    write_project(
        project.path(),
        r#"
[[criteria]]
code = "C1"
weight = 1.0

[[options]]
aspect = "C1_a"
value = 1
label = "low"

[[options]]
aspect = "C1_a"
value = 2
label = "high"
"#,
        "[[candidates]]\nid = \"x\"\n[candidates.scores]\nC1_a = 5\n",
    );

    aidrank()
        .arg("validate")
        .arg(project.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("[BLOCKING] assignment.out_of_range"));
}

#[test]
fn select_records_top_k_and_is_idempotent() {
    let project = TempDir::new().expect("temp dir should be created");
    let config = single_criterion(
        "benefit",
        "[program]\nid = \"aid-2024\"\nquota = 1\namount = 300000",
    );
    write_project(project.path(), &config, PAIR_CANDIDATES);

    aidrank()
        .arg("select")
        .arg(project.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("selection recorded"))
        .stdout(predicate::str::contains("- #1 candidate2 score=0.800000 amount=300000"));

    let record_path = project.path().join(".aidrank/programs/aid-2024.json");
    let recorded = fs::read_to_string(&record_path).expect("record should exist");
    assert!(recorded.contains("\"candidate_id\": \"candidate2\""));
    assert!(!recorded.contains("\"candidate_id\": \"candidate1\""));

    aidrank()
        .arg("select")
        .arg(project.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("selection unchanged"));
    assert_eq!(
        fs::read_to_string(&record_path).expect("record should exist"),
        recorded
    );
}

#[test]
fn select_dry_run_writes_nothing() {
    let project = TempDir::new().expect("temp dir should be created");
    let config = single_criterion("benefit", "[program]\nid = \"aid\"\nquota = 2");
    write_project(project.path(), &config, PAIR_CANDIDATES);

    aidrank()
        .arg("select")
        .arg(project.path())
        .arg("--dry-run")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("dry run"))
        .stdout(predicate::str::contains("- #2 candidate1"));
    assert!(!project.path().join(".aidrank/programs/aid.json").exists());
}

#[test]
fn select_requires_active_program() {
    let project = TempDir::new().expect("temp dir should be created");
    write_project(project.path(), &single_criterion("benefit", ""), PAIR_CANDIDATES);

    aidrank()
        .arg("select")
        .arg(project.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("no active program"));
}

#[test]
fn status_moves_from_pending_to_recorded() {
    let project = TempDir::new().expect("temp dir should be created");
    let config = single_criterion("benefit", "[program]\nid = \"aid\"\nquota = 1");
    write_project(project.path(), &config, PAIR_CANDIDATES);

    aidrank()
        .arg("status")
        .arg(project.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("selection pending"));

    aidrank()
        .arg("select")
        .arg(project.path())
        .assert()
        .code(0);

    aidrank()
        .arg("status")
        .arg(project.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("1 recipient(s) recorded"));
}

#[test]
fn status_without_program_reports_none() {
    let project = TempDir::new().expect("temp dir should be created");
    write_project(project.path(), &single_criterion("benefit", ""), PAIR_CANDIDATES);

    aidrank()
        .arg("status")
        .arg(project.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("status: no active program"));
}
