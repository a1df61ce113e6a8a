mod common;

use common::run_notesmith;

#[test]
fn doctor_subcommand_is_available() {
    let output = run_notesmith(&["doctor", "--help"]);

    assert!(
        output.status.success(),
        "doctor --help should succeed\nstdout:\n{}\nstderr:\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn doctor_reports_missing_credentials() {
    let output = run_notesmith(&["doctor"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        output.status.success(),
        "doctor should run successfully\nstdout:\n{}\nstderr:\n{}",
        stdout,
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("transcription api key"));
    assert!(stdout.contains("llm api key"));
    assert!(stdout.contains("missing"));
}

#[test]
fn doctor_json_emits_parseable_report() {
    let output = run_notesmith(&["doctor", "--json"]);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        output.status.success(),
        "doctor --json should succeed\nstdout:\n{}\nstderr:\n{}",
        stdout,
        String::from_utf8_lossy(&output.stderr)
    );

    let report: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("doctor --json should emit valid JSON");
    assert!(report.get("checks").is_some());
    assert_eq!(report["llm_provider"], "gemini");
}
