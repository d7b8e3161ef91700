//! Builder for `kube::Client`s whose requests are answered by reactors

use crate::action::Action;
use crate::fake::Fake;
use crate::reactor::{Reaction, Reactor};
use crate::reactor_service::ReactorService;
use crate::Result;

/// Builder for creating reactor-backed clients
///
/// Reactors run in the order they were added. Requests no reactor handles get
/// the answers described on [`ReactorService`].
///
/// # Example
///
/// ```rust,no_run
/// use kn_eventing_fake::reactor::Reaction;
/// use kn_eventing_fake::{ClientBuilder, Trigger};
/// use kube::Api;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let (client, fake) = ClientBuilder::new()
///     .with_namespace("test-ns")
///     .with_reactor("delete", "triggers", |_| Reaction::empty())
///     .build()
///     .await?;
///
/// let triggers: Api<Trigger> = Api::default_namespaced(client);
/// triggers.delete("new-trigger", &Default::default()).await?;
/// assert_eq!(fake.actions().len(), 1);
/// # Ok(())
/// # }
/// ```
pub struct ClientBuilder {
    reactors: Vec<Reactor>,
    namespace: String,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            reactors: Vec::new(),
            namespace: "default".to_string(),
        }
    }

    /// Default namespace of the built client
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Append a reactor; `"*"` matches any verb or resource
    pub fn with_reactor<F>(mut self, verb: &str, resource: &str, f: F) -> Self
    where
        F: Fn(&Action) -> Reaction + Send + Sync + 'static,
    {
        self.reactors.push(Reactor::new(verb, resource, f));
        self
    }

    /// Build the engine without a transport
    ///
    /// Useful with [`FakeEventingV1alpha1`](crate::fake_client::FakeEventingV1alpha1).
    pub fn build_fake(self) -> Fake {
        let fake = Fake::new();
        for reactor in self.reactors {
            fake.push_reactor(reactor);
        }
        fake
    }

    /// Build a `kube::Client` routed to the reactors, plus the engine behind it
    ///
    /// Must be called within a Tokio runtime.
    pub async fn build(self) -> Result<(kube::Client, Fake)> {
        let namespace = self.namespace.clone();
        let fake = self.build_fake();
        let service = ReactorService::new(fake.clone());
        Ok((kube::Client::new(service, namespace), fake))
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
