//! Billing frame wrapper.
//!
//! [`TrackingFrame`] pairs a Polars DataFrame with the billing columns
//! resolved for it and the name of the column that receives tracking labels.

use std::path::PathBuf;

use billtrack_common::string_values;
use billtrack_ingest::{BillingColumns, ColumnOverrides};
use polars::prelude::DataFrame;

use crate::error::Result;

/// Default name of the output label column.
pub const DEFAULT_LABEL_COLUMN: &str = "resource_tracking";

/// A billing dataset with its resolved input columns.
#[derive(Debug, Clone)]
pub struct TrackingFrame {
    /// The billing rows as a Polars DataFrame.
    pub data: DataFrame,
    /// Input columns used by the matcher.
    pub columns: BillingColumns,
    /// Source file, when the frame was read from disk.
    pub source: Option<PathBuf>,
}

impl TrackingFrame {
    /// Wraps `data`, resolving its billing columns.
    pub fn new(data: DataFrame, overrides: &ColumnOverrides) -> Result<Self> {
        let columns = BillingColumns::resolve(&data, overrides)?;
        Ok(Self {
            data,
            columns,
            source: None,
        })
    }

    #[must_use]
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    /// Returns the number of billing rows in the frame.
    pub fn record_count(&self) -> usize {
        self.data.height()
    }

    /// Reads back a label column, one entry per row.
    ///
    /// Returns `None` when the column does not exist yet.
    pub fn labels(&self, label_column: &str) -> Result<Option<Vec<Option<String>>>> {
        match self.data.column(label_column) {
            Ok(column) => Ok(Some(string_values(column)?)),
            Err(_) => Ok(None),
        }
    }

    /// True when `name` is one of the resolved billing input columns.
    pub fn is_input_column(&self, name: &str) -> bool {
        let eq = |candidate: &str| candidate.eq_ignore_ascii_case(name);
        eq(&self.columns.instance_id)
            || self.columns.resource_group.as_deref().is_some_and(eq)
            || self.columns.resource_name.as_deref().is_some_and(eq)
            || self.columns.subscription_guid.as_deref().is_some_and(eq)
    }
}
