//! Billing table loading and column resolution.

use std::path::Path;

use billtrack_common::string_values;
use billtrack_model::{BillingRow, CaseInsensitiveSet};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Accepted headers for the resource path column, in lookup order.
pub const INSTANCE_ID_ALIASES: &[&str] = &["instance_id", "InstanceId", "InstanceName", "ResourceId"];
pub const RESOURCE_GROUP_ALIASES: &[&str] =
    &["resource_group", "ResourceGroup", "ResourceGroupName"];
pub const RESOURCE_NAME_ALIASES: &[&str] = &["resource_name", "ResourceName"];
pub const SUBSCRIPTION_GUID_ALIASES: &[&str] =
    &["subscription_guid", "SubscriptionGuid", "SubscriptionId"];

/// Operator-supplied column names that replace the alias lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColumnOverrides {
    pub instance_id: Option<String>,
    pub resource_group: Option<String>,
    pub resource_name: Option<String>,
    pub subscription_guid: Option<String>,
}

/// Column names of a billing frame, as spelled in that frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingColumns {
    pub instance_id: String,
    pub resource_group: Option<String>,
    pub resource_name: Option<String>,
    pub subscription_guid: Option<String>,
}

impl BillingColumns {
    /// Resolves the billing columns present in `df`.
    ///
    /// Overrides must exist in the frame. Without an override, the first alias
    /// present wins; optional columns that are absent are left unresolved.
    ///
    /// # Errors
    ///
    /// Fails when no resource path column exists, or an override names a
    /// column the frame does not have.
    pub fn resolve(df: &DataFrame, overrides: &ColumnOverrides) -> Result<Self> {
        let lookup = CaseInsensitiveSet::new(df.get_column_names().iter().map(|n| n.as_str()));

        let instance_id = resolve_one(&lookup, overrides.instance_id.as_deref(), INSTANCE_ID_ALIASES)?
            .ok_or_else(|| IngestError::ColumnNotFound {
                column: INSTANCE_ID_ALIASES[0].to_string(),
            })?;
        let columns = Self {
            instance_id,
            resource_group: resolve_one(
                &lookup,
                overrides.resource_group.as_deref(),
                RESOURCE_GROUP_ALIASES,
            )?,
            resource_name: resolve_one(
                &lookup,
                overrides.resource_name.as_deref(),
                RESOURCE_NAME_ALIASES,
            )?,
            subscription_guid: resolve_one(
                &lookup,
                overrides.subscription_guid.as_deref(),
                SUBSCRIPTION_GUID_ALIASES,
            )?,
        };
        debug!(
            instance_id = %columns.instance_id,
            resource_group = ?columns.resource_group,
            resource_name = ?columns.resource_name,
            subscription_guid = ?columns.subscription_guid,
            "resolved billing columns"
        );
        Ok(columns)
    }
}

fn resolve_one(
    lookup: &CaseInsensitiveSet,
    explicit: Option<&str>,
    aliases: &[&str],
) -> Result<Option<String>> {
    if let Some(name) = explicit {
        return lookup
            .get(name)
            .map(|found| Some(found.to_string()))
            .ok_or_else(|| IngestError::ColumnNotFound {
                column: name.to_string(),
            });
    }
    Ok(lookup
        .find_any(aliases.iter().copied())
        .map(str::to_string))
}

/// Reads a billing CSV with a header row into a frame of text columns.
///
/// Schema inference is disabled so GUIDs and numeric-looking resource names
/// keep their exact spelling. A header-only file yields an empty frame.
pub fn read_billing_table(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded billing table"
    );
    Ok(df)
}

/// Extracts matcher input rows from a billing frame.
///
/// A null resource path becomes the empty string; blank optional cells become
/// `None`. Neither is an error.
pub fn billing_rows_from_frame(df: &DataFrame, columns: &BillingColumns) -> Result<Vec<BillingRow>> {
    let height = df.height();
    let instance_ids = read_column(df, Some(&columns.instance_id))?;
    let resource_groups = read_column(df, columns.resource_group.as_deref())?;
    let resource_names = read_column(df, columns.resource_name.as_deref())?;
    let subscription_guids = read_column(df, columns.subscription_guid.as_deref())?;

    let mut rows = Vec::with_capacity(height);
    for idx in 0..height {
        rows.push(BillingRow {
            instance_id: cell(&instance_ids, idx).unwrap_or_default(),
            resource_group: cell(&resource_groups, idx),
            subscription_guid: cell(&subscription_guids, idx),
            resource_name: cell(&resource_names, idx),
        });
    }
    Ok(rows)
}

fn read_column(df: &DataFrame, name: Option<&str>) -> Result<Option<Vec<Option<String>>>> {
    let Some(name) = name else {
        return Ok(None);
    };
    let column = df.column(name).map_err(|_| IngestError::ColumnNotFound {
        column: name.to_string(),
    })?;
    Ok(Some(string_values(column)?))
}

fn cell(values: &Option<Vec<Option<String>>>, idx: usize) -> Option<String> {
    values.as_ref().and_then(|v| v.get(idx).cloned().flatten())
}
