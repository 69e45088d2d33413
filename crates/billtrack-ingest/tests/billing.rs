//! Integration tests for billing table loading.

use std::io::Write;

use billtrack_ingest::{
    BillingColumns, ColumnOverrides, IngestError, billing_rows_from_frame, read_billing_table,
};
use tempfile::NamedTempFile;

fn create_temp_csv(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn reads_azure_export_into_rows() {
    let file = create_temp_csv(
        "InstanceId,ResourceGroup,SubscriptionGuid,Cost\n\
         /subscriptions/1/resourceGroups/Forensics/providers/Microsoft.Compute/disks/osdisk,Forensics,0001,12.50\n\
         /subscriptions/1/resourceGroups/rg/providers/Microsoft.Compute/virtualMachines/vm-01,,0001,3\n",
    );

    let df = read_billing_table(file.path()).expect("read billing table");
    assert_eq!(df.height(), 2);

    let columns = BillingColumns::resolve(&df, &ColumnOverrides::default()).unwrap();
    let rows = billing_rows_from_frame(&df, &columns).unwrap();

    assert_eq!(rows[0].last_segment(), "osdisk");
    assert_eq!(rows[0].resource_group.as_deref(), Some("Forensics"));
    assert_eq!(rows[0].subscription_guid.as_deref(), Some("0001"));
    assert_eq!(rows[1].resource_group, None);
    assert_eq!(rows[1].resource_name, None);
}

#[test]
fn numeric_looking_values_keep_their_spelling() {
    let file = create_temp_csv("instance_id,subscription_guid\n/x/007,0042\n");

    let df = read_billing_table(file.path()).unwrap();
    let columns = BillingColumns::resolve(&df, &ColumnOverrides::default()).unwrap();
    let rows = billing_rows_from_frame(&df, &columns).unwrap();

    assert_eq!(rows[0].instance_id, "/x/007");
    assert_eq!(rows[0].subscription_guid.as_deref(), Some("0042"));
}

#[test]
fn header_only_file_is_an_empty_batch() {
    let file = create_temp_csv("instance_id,resource_group\n");

    let df = read_billing_table(file.path()).unwrap();
    let columns = BillingColumns::resolve(&df, &ColumnOverrides::default()).unwrap();

    assert!(billing_rows_from_frame(&df, &columns).unwrap().is_empty());
}

#[test]
fn overrides_pick_custom_headers() {
    let file = create_temp_csv("path,rg_label\n/x/vm,Shared\n");

    let df = read_billing_table(file.path()).unwrap();
    let overrides = ColumnOverrides {
        instance_id: Some("PATH".to_string()),
        resource_group: Some("rg_label".to_string()),
        ..ColumnOverrides::default()
    };
    let columns = BillingColumns::resolve(&df, &overrides).unwrap();
    let rows = billing_rows_from_frame(&df, &columns).unwrap();

    assert_eq!(columns.instance_id, "path");
    assert_eq!(rows[0].resource_group.as_deref(), Some("Shared"));
}

#[test]
fn missing_file_is_reported() {
    let err = read_billing_table(std::path::Path::new("/nonexistent/billing.csv")).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));
}
