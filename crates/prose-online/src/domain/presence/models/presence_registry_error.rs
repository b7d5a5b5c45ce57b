// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use thiserror::Error;

/// Transport-level failures signaled by a `PresenceRegistry`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PresenceRegistryError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),
    #[error("The presence registry is unavailable: {0}")]
    Unavailable(String),
    #[error("Transport error: {0}")]
    Transport(String),
}
