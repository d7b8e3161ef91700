//! Typed client contract for the eventing API group

use crate::trigger::Trigger;
use crate::Result;
use async_trait::async_trait;

/// Per-verb, namespace-scoped access to triggers
///
/// Implemented by [`FakeEventingV1alpha1`](crate::fake_client::FakeEventingV1alpha1)
/// for tests and by [`KubeEventingClient`](crate::kube_client::KubeEventingClient)
/// against a real API server.
#[async_trait]
pub trait EventingApi: Send + Sync {
    async fn create(&self, namespace: &str, trigger: &Trigger) -> Result<Trigger>;

    async fn get(&self, namespace: &str, name: &str) -> Result<Trigger>;

    async fn delete(&self, namespace: &str, name: &str) -> Result<()>;
}
