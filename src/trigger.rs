//! Trigger custom resource (`eventing.knative.dev/v1alpha1`)

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Resource plural used in API paths and on recorded actions
pub const TRIGGERS: &str = "triggers";

/// Broker a trigger subscribes to when none is given
pub const DEFAULT_BROKER: &str = "default";

/// Desired state of a Trigger
#[derive(CustomResource, Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
#[kube(
    group = "eventing.knative.dev",
    version = "v1alpha1",
    kind = "Trigger",
    plural = "triggers",
    derive = "PartialEq",
    namespaced
)]
pub struct TriggerSpec {
    /// Name of the broker this trigger receives events from
    #[serde(default)]
    pub broker: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<TriggerFilter>,
}

/// Events matching every attribute pass the filter
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct TriggerFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<BTreeMap<String, String>>,
}

impl TriggerSpec {
    /// Spec pointing at `broker` with no filter
    pub fn with_broker(broker: impl Into<String>) -> Self {
        Self {
            broker: broker.into(),
            filter: None,
        }
    }

    /// Add an exact-match filter attribute, replacing any previous value for `key`
    pub fn filter_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filter
            .get_or_insert_with(TriggerFilter::default)
            .attributes
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Filter attributes, empty when none are set
    pub fn attributes(&self) -> BTreeMap<String, String> {
        self.filter
            .as_ref()
            .and_then(|f| f.attributes.clone())
            .unwrap_or_default()
    }
}

impl Trigger {
    /// Build a trigger named `name` in `namespace`
    pub fn namespaced(name: &str, namespace: &str, spec: TriggerSpec) -> Self {
        let mut trigger = Trigger::new(name, spec);
        trigger.metadata.namespace = Some(namespace.to_string());
        trigger
    }
}
