//! Integration tests for tracking dictionary loading.

use std::io::Write;

use billtrack_ingest::{IngestError, load_patterns};
use billtrack_model::{DEFAULT_PRIORITY, PatternError};
use tempfile::NamedTempFile;

fn create_temp(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn csv_dictionary_with_default_priority() {
    let file = create_temp(
        ".csv",
        "search_term,replacement_label,priority\n\
         aks-mlp203-16543136,aks-mlp203-16543136,1\n\
         CN-Primary-DMZ-PRD-Kubernet-20,CN-Primary-DMZ-PRD-Kubernet-20,\n\
         \n\
         Forensics, Forensics ,3\n",
    );

    let patterns = load_patterns(file.path()).expect("load dictionary");

    assert_eq!(patterns.len(), 3);
    assert_eq!(patterns.get(1).unwrap().priority, DEFAULT_PRIORITY);
    let forensics = patterns.get(2).unwrap();
    assert_eq!(forensics.replacement_label, "Forensics");
    assert_eq!(forensics.priority, 3);
}

#[test]
fn csv_search_terms_are_taken_verbatim() {
    let file = create_temp(
        ".csv",
        "search_term,replacement_label,priority\n#legacy,Legacy,1\n prd,Production, 2\n",
    );

    let patterns = load_patterns(file.path()).expect("load dictionary");

    assert_eq!(patterns.len(), 2);
    assert_eq!(patterns.get(0).unwrap().search_term, "#legacy");
    assert_eq!(patterns.get(1).unwrap().search_term, " prd");
    assert_eq!(patterns.get(1).unwrap().priority, 2);
}

#[test]
fn csv_dictionary_accepts_short_headers() {
    let file = create_temp(".csv", "Search,Label\nvm,Virtual Machines\n");

    let patterns = load_patterns(file.path()).unwrap();

    assert_eq!(patterns.get(0).unwrap().search_term, "vm");
    assert_eq!(patterns.get(0).unwrap().priority, DEFAULT_PRIORITY);
}

#[test]
fn csv_dictionary_rejects_bad_priority_with_line() {
    let file = create_temp(
        ".csv",
        "search_term,replacement_label,priority\nvm,VM,1\ndisk,Disk,high\n",
    );

    let err = load_patterns(file.path()).unwrap_err();

    match err {
        IngestError::InvalidValue {
            field, value, line, ..
        } => {
            assert_eq!(field, "priority");
            assert_eq!(value, "high");
            assert_eq!(line, 3);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn csv_dictionary_requires_label_column() {
    let file = create_temp(".csv", "search_term,priority\nvm,1\n");

    let err = load_patterns(file.path()).unwrap_err();

    assert!(matches!(err, IngestError::MissingColumn { column, .. } if column == "replacement_label"));
}

#[test]
fn empty_search_term_fails_before_matching() {
    let file = create_temp(
        ".csv",
        "search_term,replacement_label,priority\nvm,VM,1\n,Orphan,2\n",
    );

    let err = load_patterns(file.path()).unwrap_err();

    assert!(matches!(
        err,
        IngestError::Patterns {
            source: PatternError::EmptySearchTerm { index: 1 },
            ..
        }
    ));
}

#[test]
fn toml_dictionary() {
    let file = create_temp(
        ".toml",
        r#"
[[pattern]]
search_term = "aks-mlp203"
replacement_label = "Kubernetes Pool"
priority = 1

[[pattern]]
search_term = "Forensics"
replacement_label = "Forensics"
"#,
    );

    let patterns = load_patterns(file.path()).unwrap();

    assert_eq!(patterns.len(), 2);
    assert_eq!(patterns.get(0).unwrap().replacement_label, "Kubernetes Pool");
    assert_eq!(patterns.get(1).unwrap().priority, DEFAULT_PRIORITY);
}

#[test]
fn toml_dictionary_rejects_unknown_tables() {
    let file = create_temp(".toml", "[[patterns]]\nsearch_term = \"x\"\n");

    let err = load_patterns(file.path()).unwrap_err();

    assert!(matches!(err, IngestError::Toml { .. }));
}

#[test]
fn json_dictionary() {
    let file = create_temp(
        ".json",
        r#"[{"search_term": "vm", "replacement_label": "Compute", "priority": -1}]"#,
    );

    let patterns = load_patterns(file.path()).unwrap();

    assert_eq!(patterns.get(0).unwrap().priority, -1);
}

#[test]
fn missing_dictionary_is_reported() {
    let err = load_patterns(std::path::Path::new("/nonexistent/tracking.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
