//! Billing data ingestion: CSV billing tables, column resolution and the
//! tracking dictionary.

pub mod billing;
pub mod dictionary;
pub mod error;

pub use billing::{
    BillingColumns, ColumnOverrides, INSTANCE_ID_ALIASES, RESOURCE_GROUP_ALIASES,
    RESOURCE_NAME_ALIASES, SUBSCRIPTION_GUID_ALIASES, billing_rows_from_frame, read_billing_table,
};
pub use dictionary::{
    DictionaryFormat, load_patterns, read_patterns_csv, read_patterns_json, read_patterns_toml,
};
pub use error::{IngestError, Result};
