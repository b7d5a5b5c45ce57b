// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::ops::Deref;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::app::deps::{DynAppContext, DynUserDirectory};
use crate::app::services::OnlineUsersService;
use crate::client_builder::ClientBuilder;
use crate::domain::shared::models::UserId;
use crate::infra::events::{DelegateHandle, ImmediateClientEventDispatcher};
use crate::ClientEvent;

pub trait ClientDelegate: Send + Sync {
    fn handle_event(&self, event: ClientEvent);
}

#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

pub struct ClientInner {
    pub online_users: OnlineUsersService,
    pub(crate) ctx: DynAppContext,
    pub(crate) client_event_dispatcher: Arc<ImmediateClientEventDispatcher>,
    pub(crate) user_directory: DynUserDirectory,
}

impl From<Arc<ClientInner>> for Client {
    fn from(inner: Arc<ClientInner>) -> Self {
        Client { inner }
    }
}

impl Deref for Client {
    type Target = ClientInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl Client {
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }
}

impl Client {
    /// Starts a session for `account`. Users resolved from now on are compared against
    /// `account` to exclude the local user from the online users.
    pub fn connect(&self, account: UserId) {
        info!("Connecting as {account}…");
        self.ctx.set_connected_id(Some(account));

        if self.ctx.config.observe_online_users_on_connect {
            self.online_users.on();
        }
    }

    /// Ends the session. The online users are reset and the cached users are forgotten.
    pub fn disconnect(&self) -> Result<()> {
        info!("Disconnecting…");
        self.online_users.off();
        self.ctx.set_connected_id(None);
        self.user_directory.clear_cache()
    }

    pub fn connected_id(&self) -> Option<UserId> {
        self.ctx.connected_id().ok()
    }

    pub fn add_delegate(&self, delegate: Arc<dyn ClientDelegate>) -> DelegateHandle {
        self.client_event_dispatcher.add_delegate(delegate)
    }

    pub fn remove_delegate(&self, handle: DelegateHandle) -> bool {
        self.client_event_dispatcher.remove_delegate(handle)
    }
}
