// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;

use crate::domain::presence::models::{PresenceEvent, PresenceEventKind, PresenceRegistryError};
use crate::domain::presence::services::{PresenceEventObserver, PresenceRegistry};

type Observers = Vec<Arc<dyn PresenceEventObserver>>;

/// A `PresenceRegistry` living in local memory.
///
/// New `PresenceEventKind::Added` observers receive one event for each entry that is already
/// present. Overwriting an entry does not emit another `Added` event.
pub struct InMemoryPresenceRegistry {
    entries: RwLock<HashMap<String, Value>>,
    observers: RwLock<HashMap<PresenceEventKind, Observers>>,
}

impl InMemoryPresenceRegistry {
    pub fn new() -> Self {
        Self {
            entries: Default::default(),
            observers: Default::default(),
        }
    }

    pub fn set(&self, key: impl Into<String>, value: Value) {
        let key = key.into();
        let is_new = self
            .entries
            .write()
            .insert(key.clone(), value.clone())
            .is_none();

        if is_new {
            self.deliver(PresenceEventKind::Added, PresenceEvent::added(key, value));
        }
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        let value = self.entries.write().remove(key)?;
        self.deliver(PresenceEventKind::Removed, PresenceEvent::removed(key));
        Some(value)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn observer_count(&self, kind: PresenceEventKind) -> usize {
        self.observers.read().get(&kind).map_or(0, Vec::len)
    }

    /// Hands `event` to the observers of `kind` as is, without touching the entries.
    pub fn deliver(&self, kind: PresenceEventKind, event: PresenceEvent) {
        for observer in self.observers_of_kind(kind) {
            observer.handle_event(event.clone());
        }
    }

    /// Reports `error` to the observers of `kind`.
    pub fn fail(&self, kind: PresenceEventKind, error: PresenceRegistryError) {
        for observer in self.observers_of_kind(kind) {
            observer.handle_error(error.clone());
        }
    }
}

impl InMemoryPresenceRegistry {
    fn observers_of_kind(&self, kind: PresenceEventKind) -> Observers {
        self.observers
            .read()
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for InMemoryPresenceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PresenceRegistry for InMemoryPresenceRegistry {
    fn subscribe(&self, kind: PresenceEventKind, observer: Arc<dyn PresenceEventObserver>) {
        self.observers
            .write()
            .entry(kind)
            .or_default()
            .push(observer.clone());

        if kind != PresenceEventKind::Added {
            return;
        }

        let entries = self
            .entries
            .read()
            .iter()
            .map(|(key, value)| PresenceEvent::added(key.clone(), value.clone()))
            .collect::<Vec<_>>();

        for event in entries {
            observer.handle_event(event);
        }
    }

    fn unsubscribe(&self, kind: PresenceEventKind) {
        self.observers.write().remove(&kind);
    }
}
