//! Action recorder and reactor dispatch
//!
//! [`Fake`] sits behind every fake client call. It logs the [`Action`], then
//! walks the registered reactors in order and returns the result of the first
//! one that handles it. When nothing handles an action the call is a no-op
//! success: `Ok(None)`.

use crate::action::Action;
use crate::reactor::{Reaction, Reactor};
use crate::Result;
use serde_json::Value;
use std::sync::{Arc, RwLock};
use tracing::{debug, trace};

/// Records actions and dispatches them to reactors
///
/// Clones share the same reactor chain and action log, so a test can keep one
/// handle while the client under test owns another.
#[derive(Clone, Default)]
pub struct Fake {
    reactors: Arc<RwLock<Vec<Reactor>>>,
    actions: Arc<RwLock<Vec<Action>>>,
}

impl Fake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a reactor to the end of the chain
    pub fn add_reactor<F>(&self, verb: &str, resource: &str, f: F)
    where
        F: Fn(&Action) -> Reaction + Send + Sync + 'static,
    {
        self.push_reactor(Reactor::new(verb, resource, f));
    }

    /// Insert a reactor at the front of the chain, ahead of every existing one
    pub fn prepend_reactor<F>(&self, verb: &str, resource: &str, f: F)
    where
        F: Fn(&Action) -> Reaction + Send + Sync + 'static,
    {
        let reactor = Reactor::new(verb, resource, f);
        trace!("Prepending reactor: {:?}", reactor);
        self.reactors
            .write()
            .expect("reactor chain lock poisoned")
            .insert(0, reactor);
    }

    /// Append an already constructed reactor
    pub fn push_reactor(&self, reactor: Reactor) {
        trace!("Adding reactor: {:?}", reactor);
        self.reactors
            .write()
            .expect("reactor chain lock poisoned")
            .push(reactor);
    }

    /// Record `action` and return the reaction of the first reactor that handles it
    pub fn invoke(&self, action: Action) -> Result<Option<Value>> {
        trace!(
            "Invoking {} {} in namespace {}",
            action.verb(),
            action.resource(),
            action.namespace()
        );

        self.actions
            .write()
            .expect("action log lock poisoned")
            .push(action.clone());

        // Snapshot so handlers may register reactors or inspect the log
        let reactors = self
            .reactors
            .read()
            .expect("reactor chain lock poisoned")
            .clone();

        for (index, reactor) in reactors.iter().enumerate() {
            if !reactor.handles(&action) {
                continue;
            }
            match reactor.react(&action) {
                Reaction::Handled(result) => {
                    debug!(
                        "Reactor {} handled {} {}: {}",
                        index,
                        action.verb(),
                        action.resource(),
                        if result.is_ok() { "ok" } else { "error" }
                    );
                    return result;
                }
                Reaction::Unhandled => continue,
            }
        }

        debug!(
            "No reaction configured for {} {}",
            action.verb(),
            action.resource()
        );
        Ok(None)
    }

    /// Snapshot of every action invoked so far, in call order
    pub fn actions(&self) -> Vec<Action> {
        self.actions
            .read()
            .expect("action log lock poisoned")
            .clone()
    }

    pub fn clear_actions(&self) {
        self.actions
            .write()
            .expect("action log lock poisoned")
            .clear();
    }

    /// Registered reactors, in dispatch order
    pub fn reactors(&self) -> Vec<Reactor> {
        self.reactors
            .read()
            .expect("reactor chain lock poisoned")
            .clone()
    }
}

impl std::fmt::Debug for Fake {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fake")
            .field("reactors", &self.reactors())
            .field("actions", &self.actions())
            .finish()
    }
}
