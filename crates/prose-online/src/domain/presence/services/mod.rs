// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use presence_registry::{PresenceEventObserver, PresenceRegistry};

mod presence_registry;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::presence_registry::MockPresenceRegistry;
}
