//! Namespace-bound trigger client

use crate::trigger::Trigger;
use crate::typed::EventingApi;
use crate::Result;
use tracing::debug;

/// Create, get and delete triggers in one namespace
///
/// The namespace is fixed at construction and used for every call, whatever
/// namespace an input object carries. Errors from the underlying client are
/// returned unchanged.
pub struct EventingClient<C> {
    client: C,
    namespace: String,
}

impl<C: EventingApi> EventingClient<C> {
    pub fn new(client: C, namespace: impl Into<String>) -> Self {
        Self {
            client,
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Create `trigger`, returning the object as the server stored it
    pub async fn create_trigger(&self, trigger: &Trigger) -> Result<Trigger> {
        debug!(
            "Creating trigger {:?} in {}",
            trigger.metadata.name, self.namespace
        );
        self.client.create(&self.namespace, trigger).await
    }

    pub async fn get_trigger(&self, name: &str) -> Result<Trigger> {
        debug!("Getting trigger {} in {}", name, self.namespace);
        self.client.get(&self.namespace, name).await
    }

    pub async fn delete_trigger(&self, name: &str) -> Result<()> {
        debug!("Deleting trigger {} in {}", name, self.namespace);
        self.client.delete(&self.namespace, name).await
    }
}
