//! Billing rows and the closed set of fields a tracking pattern can match.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One candidate field of a billing row.
///
/// Variants are declared in precedence order, so the derived `Ord` agrees with
/// [`MatchField::PRECEDENCE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchField {
    /// Final non-empty segment of the `instance_id` resource path.
    LastSegment,
    ResourceGroup,
    ResourceName,
    SubscriptionGuid,
}

impl MatchField {
    /// Order in which fields are consulted when picking a row's label.
    pub const PRECEDENCE: [MatchField; 4] = [
        MatchField::LastSegment,
        MatchField::ResourceGroup,
        MatchField::ResourceName,
        MatchField::SubscriptionGuid,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LastSegment => "last_segment",
            Self::ResourceGroup => "resource_group",
            Self::ResourceName => "resource_name",
            Self::SubscriptionGuid => "subscription_guid",
        }
    }
}

impl fmt::Display for MatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the final non-empty `/`-delimited segment of an Azure resource path.
///
/// A value without any `/` is its own last segment. A value made only of
/// separators yields the empty string.
///
/// ```
/// use billtrack_model::last_path_segment;
///
/// assert_eq!(
///     last_path_segment("/subscriptions/x/virtualMachineScaleSets/aks-mlp203-16543136-vmss"),
///     "aks-mlp203-16543136-vmss"
/// );
/// assert_eq!(last_path_segment("standalone-disk"), "standalone-disk");
/// assert_eq!(last_path_segment("vm-01/"), "vm-01");
/// ```
pub fn last_path_segment(instance_id: &str) -> &str {
    instance_id
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or("")
}

/// One Azure billing record as seen by the tracking matcher.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingRow {
    /// Slash-delimited Azure resource path. Casing varies between exports.
    pub instance_id: String,
    pub resource_group: Option<String>,
    pub subscription_guid: Option<String>,
    pub resource_name: Option<String>,
}

impl BillingRow {
    pub fn new(instance_id: impl Into<String>) -> Self {
        Self {
            instance_id: instance_id.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_resource_group(mut self, value: impl Into<String>) -> Self {
        self.resource_group = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_resource_name(mut self, value: impl Into<String>) -> Self {
        self.resource_name = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_subscription_guid(mut self, value: impl Into<String>) -> Self {
        self.subscription_guid = Some(value.into());
        self
    }

    /// Value of a candidate field, or `None` when the row does not carry it.
    pub fn field(&self, field: MatchField) -> Option<&str> {
        match field {
            MatchField::LastSegment => Some(last_path_segment(&self.instance_id)),
            MatchField::ResourceGroup => self.resource_group.as_deref(),
            MatchField::ResourceName => self.resource_name.as_deref(),
            MatchField::SubscriptionGuid => self.subscription_guid.as_deref(),
        }
    }

    /// The last segment of `instance_id`.
    pub fn last_segment(&self) -> &str {
        last_path_segment(&self.instance_id)
    }
}
