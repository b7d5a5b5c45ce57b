// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::ClientEvent;

/// Broadcasts `ClientEvent`s to whoever is listening at the time of the call.
#[cfg_attr(feature = "test", mockall::automock)]
pub trait ClientEventDispatcherTrait: Send + Sync {
    fn dispatch_event(&self, event: ClientEvent);
}
