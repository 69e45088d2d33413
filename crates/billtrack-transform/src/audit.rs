//! Audit sink frame construction.

use billtrack_model::AuditRecord;
use polars::prelude::{Column, DataFrame, NamedFrom};

use crate::error::Result;

/// Column order of the audit frame.
pub const AUDIT_COLUMNS: [&str; 6] = [
    "row_index",
    "instance_id",
    "last_segment_match",
    "resource_group_match",
    "selected_match",
    "selected_field",
];

/// Builds the audit frame, one row per ambiguous billing row.
///
/// An empty record list yields a zero-row frame with the same schema.
pub fn build_audit_frame(records: &[AuditRecord]) -> Result<DataFrame> {
    let row_index: Vec<u64> = records.iter().map(|r| r.row_index as u64).collect();

    let columns = vec![
        Column::new(AUDIT_COLUMNS[0].into(), row_index),
        text_column(AUDIT_COLUMNS[1], records, |r| r.instance_id.as_str()),
        text_column(AUDIT_COLUMNS[2], records, |r| r.last_segment_match.as_str()),
        text_column(AUDIT_COLUMNS[3], records, |r| r.resource_group_match.as_str()),
        text_column(AUDIT_COLUMNS[4], records, |r| r.selected_match.as_str()),
        text_column(AUDIT_COLUMNS[5], records, |r| r.selected_field.as_str()),
    ];
    Ok(DataFrame::new(columns)?)
}

fn text_column<F>(name: &str, records: &[AuditRecord], value: F) -> Column
where
    F: Fn(&AuditRecord) -> &str,
{
    let values: Vec<&str> = records.iter().map(value).collect();
    Column::new(name.into(), values)
}
