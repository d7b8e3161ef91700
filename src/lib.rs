//! Namespace-scoped client for Knative eventing triggers, with an
//! action/reactor fake for testing it without an API server.
//!
//! Modelled on client-go's `testing.Fake`: every call made through a fake
//! client is recorded as an [`Action`](action::Action) and answered by the
//! first matching [`Reactor`](reactor::Reactor).
//!
//! # Examples
//!
//! ## Fake typed client
//!
//! ```rust
//! use kn_eventing_fake::action::Action;
//! use kn_eventing_fake::reactor::Reaction;
//! use kn_eventing_fake::testing::setup;
//! use kn_eventing_fake::{Trigger, TriggerSpec};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (fake, client) = setup("test-ns");
//!
//! fake.add_reactor("get", "triggers", |action: &Action| match action.name() {
//!     Some("errorTrigger") => Reaction::failed("error while getting trigger errorTrigger"),
//!     Some(name) => Reaction::object(Trigger::namespaced(
//!         name,
//!         "test-ns",
//!         TriggerSpec::with_broker("default"),
//!     )),
//!     None => Reaction::unhandled(),
//! });
//!
//! let trigger = client.get_trigger("mytrigger").await?;
//! assert_eq!(trigger.spec.broker, "default");
//! assert!(client.get_trigger("errorTrigger").await.is_err());
//! # Ok(())
//! # }
//! ```
//!
//! ## Reactor-backed `kube::Client`
//!
//! ```rust
//! use kn_eventing_fake::kube_client::KubeEventingClient;
//! use kn_eventing_fake::reactor::Reaction;
//! use kn_eventing_fake::{ClientBuilder, EventingClient, Trigger, TriggerSpec};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let (kube_client, fake) = ClientBuilder::new()
//!     .with_namespace("test-ns")
//!     .with_reactor("get", "triggers", |_| {
//!         Reaction::object(Trigger::namespaced("mytrigger", "test-ns", TriggerSpec::default()))
//!     })
//!     .build()
//!     .await?;
//!
//! let client = EventingClient::new(KubeEventingClient::new(kube_client), "test-ns");
//! let trigger = client.get_trigger("mytrigger").await?;
//! assert_eq!(trigger.metadata.name.as_deref(), Some("mytrigger"));
//! assert_eq!(fake.actions().len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod action;
mod builder;
mod client;
mod error;
pub mod fake;
pub mod fake_client;
pub mod kube_client;
pub mod reactor;
mod reactor_service;
pub mod testing;
mod trigger;
pub mod typed;

#[cfg(test)]
mod fake_test;

pub use builder::ClientBuilder;
pub use client::EventingClient;
pub use error::{Error, Result};
pub use fake::Fake;
pub use reactor_service::ReactorService;
pub use trigger::{Trigger, TriggerFilter, TriggerSpec, DEFAULT_BROKER, TRIGGERS};
