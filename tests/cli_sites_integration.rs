//! Runs the binary against bundled site files and presets.

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_bess-sizer"))
        .args(args)
        .env_remove("BESS_LOG")
        .output()
        .expect("bess-sizer process should run")
}

fn stdout_of(args: &[&str]) -> String {
    let output = run(args);
    assert!(
        output.status.success(),
        "bess-sizer {args:?} failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("stdout should be valid UTF-8")
}

#[test]
fn default_run_prints_result_and_proposal() {
    let out = stdout_of(&[]);
    assert!(out.contains("--- Sizing Result ---"));
    assert!(out.contains("SUBJECT: JP NELSON BESS SYSTEM SIZING & SITE ANALYSIS"));
    assert!(out.contains("CUSTOM MULTI-UNIT ARRAY"));
}

#[test]
fn site_file_sizes_upgraded_crane() {
    let out = stdout_of(&["--site", "sites/tower_crane_upgrade.toml"]);
    assert!(out.contains("- RECOMMENDED UNIT: JP NELSON BESS-500"));
    assert!(out.contains("- CALCULATED PEAK SURGE: 530 kW"));
}

#[test]
fn hybrid_site_reports_economics() {
    let out = stdout_of(&["--site", "sites/genset_hybrid.toml"]);
    assert!(out.contains("- EST. MONTHLY SAVING: 384,800 THB"));
    assert!(out.contains("BESS-500/HD"));
}

#[test]
fn scenario_override_switches_mode() {
    let out = stdout_of(&["--preset", "grid_augmentation", "--scenario", "C"]);
    assert!(out.contains("[3] ECONOMIC IMPACT (HYBRID MODE):"));
}

#[test]
fn json_output_is_structured() {
    let out = stdout_of(&["--site", "sites/tower_crane_upgrade.toml", "--format", "json"]);
    let doc: serde_json::Value = serde_json::from_str(&out).expect("valid JSON");
    assert_eq!(doc["result"]["total_peak_load_kw"], 530.0);
    assert_eq!(doc["result"]["fit_status"], "perfect");
    assert_eq!(doc["result"]["recommended_model"]["id"], "bess-500");
    assert_eq!(doc["profile"].as_array().map(Vec::len), Some(3));
    assert_eq!(doc["site"]["loads"][0]["id"], 1);
}

#[test]
fn alternate_catalog_changes_recommendation() {
    let out = stdout_of(&[
        "--site",
        "sites/tower_crane_upgrade.toml",
        "--catalog",
        "sites/rental_fleet.toml",
    ]);
    assert!(out.contains("- RECOMMENDED UNIT: RENTAL BESS-600"));
}

#[test]
fn list_catalog_prints_tables() {
    let out = stdout_of(&["--list-catalog"]);
    assert!(out.contains("bess-500hd"));
    assert!(out.contains("--- Starter Types ---"));
}

#[test]
fn profile_csv_is_written() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("profile.csv");
    let path_str = path.to_str().expect("utf-8 path");
    stdout_of(&["--preset", "peak_shaving", "--profile-out", path_str]);

    let csv = std::fs::read_to_string(&path).expect("csv written");
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("label,kind,peak_kw,grid_ceiling_kw,over_ceiling"));
    assert_eq!(csv.lines().count(), 5);
}

#[test]
fn unknown_preset_fails() {
    let output = run(&["--preset", "nowhere"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown preset"));
}

#[test]
fn site_and_preset_conflict() {
    let output = run(&["--site", "sites/genset_hybrid.toml", "--preset", "peak_shaving"]);
    assert!(!output.status.success());
}

#[cfg(feature = "tui")]
#[test]
fn tui_reads_site_file_before_starting() {
    // a missing site file fails before the terminal is touched
    let output = run(&["--tui", "--site", "sites/does_not_exist.toml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("does_not_exist.toml"));
}

#[cfg(feature = "tui")]
#[test]
fn tui_rejects_one_shot_output_flags() {
    let output = run(&["--tui", "--format", "json"]);
    assert!(!output.status.success());
    let output = run(&["--tui", "--profile-out", "profile.csv"]);
    assert!(!output.status.success());
}

#[cfg(feature = "api")]
#[test]
fn serve_rejects_site_selection() {
    let output = run(&["--serve", "--site", "sites/genset_hybrid.toml"]);
    assert!(!output.status.success());
    let output = run(&["--serve", "--scenario", "C"]);
    assert!(!output.status.success());
}
