// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use crate::domain::presence::models::{PresenceEvent, PresenceEventKind, PresenceRegistryError};

/// Receives the events of a single `PresenceEventKind` from a `PresenceRegistry`.
pub trait PresenceEventObserver: Send + Sync {
    fn handle_event(&self, event: PresenceEvent);
    fn handle_error(&self, error: PresenceRegistryError);
}

/// The remote registry which holds one entry per online user.
///
/// Implementations deliver events synchronously and in order. After `unsubscribe` returns, no
/// observer of that kind is invoked anymore.
#[cfg_attr(feature = "test", mockall::automock)]
pub trait PresenceRegistry: Send + Sync {
    fn subscribe(&self, kind: PresenceEventKind, observer: Arc<dyn PresenceEventObserver>);
    fn unsubscribe(&self, kind: PresenceEventKind);
}
