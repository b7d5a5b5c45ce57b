// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use serde_json::Value;
use strum_macros::Display;

use crate::domain::shared::models::UserId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum PresenceEventKind {
    /// An entry appeared in the registry.
    Added,
    /// An entry was deleted from the registry.
    Removed,
}

/// An entry of the presence registry as delivered to a `PresenceEventObserver`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PresenceEvent {
    pub key: Option<String>,
    pub value: Option<Value>,
}

impl PresenceEvent {
    pub fn added(key: impl Into<String>, value: Value) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value),
        }
    }

    pub fn removed(key: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: None,
        }
    }
}

impl PresenceEvent {
    pub fn user_id(&self) -> Option<UserId> {
        self.key.as_deref()?.parse().ok()
    }

    /// Returns true if the event carries a value that marks a live entry. `null`, `false`, `0`
    /// and the empty string are deletion artifacts.
    pub fn has_value(&self) -> bool {
        match &self.value {
            None | Some(Value::Null) => false,
            Some(Value::Bool(flag)) => *flag,
            Some(Value::Number(number)) => number.as_f64().map_or(true, |n| n != 0.0),
            Some(Value::String(string)) => !string.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
        }
    }
}
