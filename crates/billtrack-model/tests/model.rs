//! Tests for billtrack-model types.

use billtrack_model::{
    BillingRow, MatchField, MatchPattern, MatchReport, PatternError, PatternSet,
};

#[test]
fn pattern_set_from_vec_validates() {
    let set: Result<PatternSet, PatternError> = vec![
        MatchPattern::new("aks-mlp203-16543136", "aks-mlp203-16543136", 1),
        MatchPattern::new(
            "CN-Primary-DMZ-PRD-Kubernet-20",
            "CN-Primary-DMZ-PRD-Kubernet-20",
            1,
        ),
    ]
    .try_into();
    let set = set.expect("valid patterns");
    assert_eq!(set.len(), 2);
    let terms: Vec<&str> = set.iter().map(|p| p.search_term.as_str()).collect();
    assert_eq!(
        terms,
        vec!["aks-mlp203-16543136", "CN-Primary-DMZ-PRD-Kubernet-20"]
    );
}

#[test]
fn pattern_error_display() {
    let err = PatternSet::new(vec![MatchPattern::new("", "X", 1)]).unwrap_err();
    assert_eq!(err.to_string(), "pattern #0 has an empty search term");
}

#[test]
fn billing_row_serializes_optional_fields() {
    let row = BillingRow::new("/subscriptions/1/resourceGroups/rg/vm-1").with_resource_group("rg");
    let json = serde_json::to_string(&row).expect("serialize row");
    let round: BillingRow = serde_json::from_str(&json).expect("deserialize row");
    assert_eq!(round, row);
    assert_eq!(round.field(MatchField::LastSegment), Some("vm-1"));
    assert_eq!(round.field(MatchField::ResourceName), None);
}

#[test]
fn empty_report_summary() {
    let summary = MatchReport::default().summary();
    assert_eq!(summary.rows, 0);
    assert_eq!(summary.match_ratio(), 0.0);
    assert!(summary.by_label.is_empty());
}
