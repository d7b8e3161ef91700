//! Typed client talking to an API server through `kube`

use crate::trigger::Trigger;
use crate::typed::EventingApi;
use crate::Result;
use async_trait::async_trait;
use kube::api::{Api, DeleteParams, PostParams};
use tracing::trace;

/// Typed eventing client over a [`kube::Client`]
///
/// The client may point at a live cluster or at one built by
/// [`ClientBuilder`](crate::ClientBuilder).
#[derive(Clone)]
pub struct KubeEventingClient {
    client: kube::Client,
}

impl KubeEventingClient {
    pub fn new(client: kube::Client) -> Self {
        Self { client }
    }

    fn triggers(&self, namespace: &str) -> Api<Trigger> {
        Api::namespaced(self.client.clone(), namespace)
    }
}

#[async_trait]
impl EventingApi for KubeEventingClient {
    async fn create(&self, namespace: &str, trigger: &Trigger) -> Result<Trigger> {
        trace!("POST trigger in namespace {}", namespace);
        Ok(self
            .triggers(namespace)
            .create(&PostParams::default(), trigger)
            .await?)
    }

    async fn get(&self, namespace: &str, name: &str) -> Result<Trigger> {
        trace!("GET trigger {}/{}", namespace, name);
        Ok(self.triggers(namespace).get(name).await?)
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<()> {
        trace!("DELETE trigger {}/{}", namespace, name);
        self.triggers(namespace)
            .delete(name, &DeleteParams::default())
            .await?;
        Ok(())
    }
}
