//! Reactors decide how a fake client responds to an action
//!
//! A reactor pairs a `(verb, resource)` predicate with a handler. The handler
//! either declines the action with [`Reaction::Unhandled`] so later reactors
//! get a chance, or settles it with [`Reaction::Handled`].
//!
//! # Example
//! ```
//! use kn_eventing_fake::action::Action;
//! use kn_eventing_fake::reactor::{Reaction, Reactor};
//!
//! let reactor = Reactor::new("delete", "triggers", |action: &Action| {
//!     match action.name() {
//!         Some("errorTrigger") => Reaction::failed("error while deleting trigger errorTrigger"),
//!         _ => Reaction::empty(),
//!     }
//! });
//! assert!(reactor.handles(&Action::delete("triggers", "test-ns", "t1")));
//! ```

use crate::action::Action;
use crate::{Error, Result};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Outcome of running a reactor handler
#[derive(Debug)]
pub enum Reaction {
    /// The handler declined; dispatch continues with the next reactor
    Unhandled,
    /// The handler settled the action with this result
    Handled(Result<Option<Value>>),
}

impl Reaction {
    pub fn unhandled() -> Self {
        Reaction::Unhandled
    }

    /// Handled, returning no object
    pub fn empty() -> Self {
        Reaction::Handled(Ok(None))
    }

    /// Handled, returning `obj`
    pub fn object<T: Serialize>(obj: T) -> Self {
        Reaction::Handled(serde_json::to_value(obj).map(Some).map_err(Error::from))
    }

    /// Handled, failing with `err`
    pub fn error(err: Error) -> Self {
        Reaction::Handled(Err(err))
    }

    /// Handled, failing with [`Error::OperationFailed`]
    pub fn failed(message: impl Into<String>) -> Self {
        Reaction::error(Error::failed(message))
    }
}

pub type ReactionFunc = Arc<dyn Fn(&Action) -> Reaction + Send + Sync>;

/// A registered `(verb, resource)` predicate and its handler
#[derive(Clone)]
pub struct Reactor {
    verb: String,
    resource: String,
    reaction: ReactionFunc,
}

impl Reactor {
    /// Create a reactor; `"*"` as verb or resource matches anything
    pub fn new<F>(verb: impl Into<String>, resource: impl Into<String>, f: F) -> Self
    where
        F: Fn(&Action) -> Reaction + Send + Sync + 'static,
    {
        Self {
            verb: verb.into(),
            resource: resource.into(),
            reaction: Arc::new(f),
        }
    }

    pub fn verb(&self) -> &str {
        &self.verb
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Whether this reactor's predicate matches `action`
    pub fn handles(&self, action: &Action) -> bool {
        action.matches(&self.verb, &self.resource)
    }

    /// Run the handler against `action`
    pub fn react(&self, action: &Action) -> Reaction {
        (self.reaction)(action)
    }
}

impl fmt::Debug for Reactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reactor")
            .field("verb", &self.verb)
            .field("resource", &self.resource)
            .finish_non_exhaustive()
    }
}
