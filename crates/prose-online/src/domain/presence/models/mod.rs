// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use presence_event::{PresenceEvent, PresenceEventKind};
pub use presence_registry_error::PresenceRegistryError;

mod presence_event;
mod presence_registry_error;
