//! Integration tests for the match pipeline stages.

use std::fs;
use std::path::Path;

use billtrack_cli::pipeline::{default_output_paths, load_matcher, run_match};
use billtrack_cli::types::MatchSettings;
use billtrack_ingest::ColumnOverrides;
use billtrack_match::MatchOptions;
use tempfile::TempDir;

const BILLING: &str = "\
InstanceId,ResourceGroup,Cost
/subscriptions/s1/resourceGroups/prod-rg/providers/vm/web01,prod-rg,12.50
/subscriptions/s1/resourceGroups/shared/providers/vm/db02,shared,3.10
/subscriptions/s1/resourceGroups/misc/providers/vm/cache,,0.40
";

const DICTIONARY: &str = "\
search_term,replacement_label,priority
web,frontend,1
prod,production,2
db,database,1
";

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn settings(dir: &TempDir) -> MatchSettings {
    let billing = write(dir.path(), "usage.csv", BILLING);
    let patterns = write(dir.path(), "tracking.csv", DICTIONARY);
    let (output, audit) = default_output_paths(&billing);
    MatchSettings {
        billing,
        patterns,
        output,
        audit,
        label_column: "resource_tracking".to_string(),
        columns: ColumnOverrides::default(),
        matching: MatchOptions::default(),
        dry_run: false,
    }
}

#[test]
fn writes_labelled_table() {
    let dir = TempDir::new().unwrap();
    let settings = settings(&dir);

    let result = run_match(&settings).unwrap();

    assert_eq!(result.pattern_count, 3);
    assert_eq!(result.summary.rows, 3);
    assert_eq!(result.summary.matched, 2);
    assert_eq!(result.output.as_deref(), Some(settings.output.as_path()));
    let tracked = fs::read_to_string(&settings.output).unwrap();
    insta::assert_snapshot!(tracked, @r"
    InstanceId,ResourceGroup,Cost,resource_tracking
    /subscriptions/s1/resourceGroups/prod-rg/providers/vm/web01,prod-rg,12.50,FRONTEND
    /subscriptions/s1/resourceGroups/shared/providers/vm/db02,shared,3.10,DATABASE
    /subscriptions/s1/resourceGroups/misc/providers/vm/cache,,0.40,
    ");
}

#[test]
fn writes_audit_for_ambiguous_rows() {
    let dir = TempDir::new().unwrap();
    let settings = settings(&dir);

    let result = run_match(&settings).unwrap();

    assert_eq!(result.audit.as_deref(), Some(settings.audit.as_path()));
    let audit = fs::read_to_string(&settings.audit).unwrap();
    insta::assert_snapshot!(audit, @r"
    row_index,instance_id,last_segment_match,resource_group_match,selected_match,selected_field
    0,/subscriptions/s1/resourceGroups/prod-rg/providers/vm/web01,FRONTEND,PRODUCTION,FRONTEND,last_segment
    ");
}

#[test]
fn audit_is_skipped_when_nothing_is_ambiguous() {
    let dir = TempDir::new().unwrap();
    let mut settings = settings(&dir);
    settings.patterns = write(dir.path(), "tracking.toml", "[[pattern]]\nsearch_term = \"db\"\nreplacement_label = \"database\"\n");

    let result = run_match(&settings).unwrap();

    assert_eq!(result.summary.matched, 1);
    assert!(result.audit.is_none());
    assert!(!settings.audit.exists());
    assert!(settings.output.exists());
}

#[test]
fn rerun_without_ambiguity_removes_previous_audit() {
    let dir = TempDir::new().unwrap();
    let mut settings = settings(&dir);

    let first = run_match(&settings).unwrap();
    assert_eq!(first.summary.ambiguous, 1);
    assert!(settings.audit.exists());

    settings.patterns = write(dir.path(), "single.csv", "search_term,replacement_label
db,database
");
    let second = run_match(&settings).unwrap();

    assert_eq!(second.summary.ambiguous, 0);
    assert!(second.audit.is_none());
    assert!(!settings.audit.exists());
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let mut settings = settings(&dir);
    settings.dry_run = true;

    let result = run_match(&settings).unwrap();

    assert_eq!(result.summary.ambiguous, 1);
    assert!(result.output.is_none());
    assert!(!settings.output.exists());
    assert!(!settings.audit.exists());
}

#[test]
fn invalid_dictionary_fails_before_ingest() {
    let dir = TempDir::new().unwrap();
    let mut settings = settings(&dir);
    settings.patterns = write(dir.path(), "bad.csv", "search_term,replacement_label\n,orphan\n");
    settings.billing = dir.path().join("missing.csv");

    let err = run_match(&settings).unwrap_err();
    assert!(format!("{err:#}").contains("bad.csv"));
    assert!(load_matcher(&settings.patterns).is_err());
}

#[test]
fn custom_label_column_and_sequential_matching() {
    let dir = TempDir::new().unwrap();
    let mut settings = settings(&dir);
    settings.label_column = "Tracking".to_string();
    settings.matching = MatchOptions::sequential();

    run_match(&settings).unwrap();

    let tracked = fs::read_to_string(&settings.output).unwrap();
    let header = tracked.lines().next().unwrap();
    assert_eq!(header, "InstanceId,ResourceGroup,Cost,Tracking");
}
