//! Recorded client operations
//!
//! Every call made through a fake client is captured as an [`Action`]. The
//! verb is the variant tag, so reactors match on it instead of downcasting:
//!
//! ```
//! use kn_eventing_fake::action::Action;
//!
//! let action = Action::get("triggers", "test-ns", "mytrigger");
//! match &action {
//!     Action::Get(get) => assert_eq!(get.name, "mytrigger"),
//!     _ => unreachable!(),
//! }
//! ```

use crate::Result;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Matches any verb or resource when used in a reactor
pub const ANY: &str = "*";

/// Operation verb
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Verb {
    Create,
    Get,
    Delete,
    Update,
    List,
    /// Any verb not modelled above
    Other(String),
}

impl Verb {
    pub fn as_str(&self) -> &str {
        match self {
            Verb::Create => "create",
            Verb::Get => "get",
            Verb::Delete => "delete",
            Verb::Update => "update",
            Verb::List => "list",
            Verb::Other(verb) => verb,
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Verb {
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "create" => Verb::Create,
            "get" => Verb::Get,
            "delete" => Verb::Delete,
            "update" => Verb::Update,
            "list" => Verb::List,
            other => Verb::Other(other.to_string()),
        }
    }
}

impl FromStr for Verb {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Verb::from(s))
    }
}

/// Payload of a create operation
#[derive(Debug, Clone, PartialEq)]
pub struct CreateAction {
    pub resource: String,
    pub namespace: String,
    /// The object as sent by the client
    pub object: Value,
}

/// Payload of a get operation
#[derive(Debug, Clone, PartialEq)]
pub struct GetAction {
    pub resource: String,
    pub namespace: String,
    pub name: String,
}

/// Payload of a delete operation
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteAction {
    pub resource: String,
    pub namespace: String,
    pub name: String,
}

/// Payload of an update operation
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateAction {
    pub resource: String,
    pub namespace: String,
    pub object: Value,
}

/// Payload of a list operation
#[derive(Debug, Clone, PartialEq)]
pub struct ListAction {
    pub resource: String,
    pub namespace: String,
}

/// Payload of a verb without a dedicated variant
#[derive(Debug, Clone, PartialEq)]
pub struct GenericAction {
    pub verb: String,
    pub resource: String,
    pub namespace: String,
    pub name: Option<String>,
    pub object: Option<Value>,
}

/// One intercepted client operation
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Create(CreateAction),
    Get(GetAction),
    Delete(DeleteAction),
    Update(UpdateAction),
    List(ListAction),
    Generic(GenericAction),
}

impl Action {
    pub fn create(resource: &str, namespace: &str, object: Value) -> Self {
        Action::Create(CreateAction {
            resource: resource.to_string(),
            namespace: namespace.to_string(),
            object,
        })
    }

    pub fn get(resource: &str, namespace: &str, name: &str) -> Self {
        Action::Get(GetAction {
            resource: resource.to_string(),
            namespace: namespace.to_string(),
            name: name.to_string(),
        })
    }

    pub fn delete(resource: &str, namespace: &str, name: &str) -> Self {
        Action::Delete(DeleteAction {
            resource: resource.to_string(),
            namespace: namespace.to_string(),
            name: name.to_string(),
        })
    }

    pub fn update(resource: &str, namespace: &str, object: Value) -> Self {
        Action::Update(UpdateAction {
            resource: resource.to_string(),
            namespace: namespace.to_string(),
            object,
        })
    }

    pub fn list(resource: &str, namespace: &str) -> Self {
        Action::List(ListAction {
            resource: resource.to_string(),
            namespace: namespace.to_string(),
        })
    }

    pub fn verb(&self) -> Verb {
        match self {
            Action::Create(_) => Verb::Create,
            Action::Get(_) => Verb::Get,
            Action::Delete(_) => Verb::Delete,
            Action::Update(_) => Verb::Update,
            Action::List(_) => Verb::List,
            Action::Generic(a) => Verb::from(a.verb.as_str()),
        }
    }

    pub fn resource(&self) -> &str {
        match self {
            Action::Create(a) => &a.resource,
            Action::Get(a) => &a.resource,
            Action::Delete(a) => &a.resource,
            Action::Update(a) => &a.resource,
            Action::List(a) => &a.resource,
            Action::Generic(a) => &a.resource,
        }
    }

    pub fn namespace(&self) -> &str {
        match self {
            Action::Create(a) => &a.namespace,
            Action::Get(a) => &a.namespace,
            Action::Delete(a) => &a.namespace,
            Action::Update(a) => &a.namespace,
            Action::List(a) => &a.namespace,
            Action::Generic(a) => &a.namespace,
        }
    }

    /// Name the operation targets
    ///
    /// For create and update this is read from the object's `metadata.name`.
    pub fn name(&self) -> Option<&str> {
        match self {
            Action::Get(a) => Some(&a.name),
            Action::Delete(a) => Some(&a.name),
            Action::Create(CreateAction { object, .. })
            | Action::Update(UpdateAction { object, .. }) => object_name(object),
            Action::List(_) => None,
            Action::Generic(a) => a
                .name
                .as_deref()
                .or_else(|| a.object.as_ref().and_then(object_name)),
        }
    }

    /// Object carried by create and update actions
    pub fn object(&self) -> Option<&Value> {
        match self {
            Action::Create(a) => Some(&a.object),
            Action::Update(a) => Some(&a.object),
            Action::Generic(a) => a.object.as_ref(),
            _ => None,
        }
    }

    /// Check whether this action is `verb` on `resource`; `"*"` matches anything
    pub fn matches(&self, verb: &str, resource: &str) -> bool {
        (verb == ANY || self.verb().as_str().eq_ignore_ascii_case(verb))
            && (resource == ANY || self.resource() == resource)
    }
}

impl CreateAction {
    /// Deserialize the carried object
    pub fn decode<K: DeserializeOwned>(&self) -> Result<K> {
        Ok(serde_json::from_value(self.object.clone())?)
    }
}

fn object_name(object: &Value) -> Option<&str> {
    object
        .get("metadata")
        .and_then(|m| m.get("name"))
        .and_then(|n| n.as_str())
}
