// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use in_memory_presence_registry::InMemoryPresenceRegistry;

mod in_memory_presence_registry;
