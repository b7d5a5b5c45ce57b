// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;
use parking_lot::RwLock;
use serde::Deserialize;

use crate::domain::shared::models::UserId;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Start mirroring the online users as soon as the client connects.
    pub observe_online_users_on_connect: bool,
}

pub struct AppContext {
    pub connected_id: RwLock<Option<UserId>>,
    pub config: AppConfig,
}

impl AppContext {
    pub fn new(config: AppConfig) -> Self {
        Self {
            connected_id: Default::default(),
            config,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            observe_online_users_on_connect: true,
        }
    }
}

impl AppContext {
    pub fn connected_id(&self) -> Result<UserId> {
        self.connected_id.read().clone().ok_or(anyhow::anyhow!(
            "Failed to read the user's id since the client is not connected."
        ))
    }

    pub fn set_connected_id(&self, id: Option<UserId>) {
        *self.connected_id.write() = id
    }
}
