//! Fake typed client that records every call as an action

use crate::action::{Action, Verb};
use crate::fake::Fake;
use crate::trigger::{Trigger, TRIGGERS};
use crate::typed::EventingApi;
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;

/// Typed eventing client backed by a [`Fake`]
///
/// Nothing is stored: each call becomes an [`Action`] and whatever the
/// reactors return is handed back.
#[derive(Clone, Debug, Default)]
pub struct FakeEventingV1alpha1 {
    fake: Fake,
}

impl FakeEventingV1alpha1 {
    pub fn new(fake: Fake) -> Self {
        Self { fake }
    }

    /// The engine reactors are installed on
    pub fn fake(&self) -> &Fake {
        &self.fake
    }

    fn decode(verb: Verb, value: Option<Value>) -> Result<Trigger> {
        let value = value.ok_or_else(|| Error::EmptyResponse {
            verb: verb.to_string(),
            resource: TRIGGERS.to_string(),
        })?;
        Ok(serde_json::from_value(value)?)
    }
}

impl From<Fake> for FakeEventingV1alpha1 {
    fn from(fake: Fake) -> Self {
        Self::new(fake)
    }
}

#[async_trait]
impl EventingApi for FakeEventingV1alpha1 {
    async fn create(&self, namespace: &str, trigger: &Trigger) -> Result<Trigger> {
        let object = serde_json::to_value(trigger)?;
        let result = self.fake.invoke(Action::create(TRIGGERS, namespace, object))?;
        Self::decode(Verb::Create, result)
    }

    async fn get(&self, namespace: &str, name: &str) -> Result<Trigger> {
        let result = self.fake.invoke(Action::get(TRIGGERS, namespace, name))?;
        Self::decode(Verb::Get, result)
    }

    async fn delete(&self, namespace: &str, name: &str) -> Result<()> {
        self.fake.invoke(Action::delete(TRIGGERS, namespace, name))?;
        Ok(())
    }
}
