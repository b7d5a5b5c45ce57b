// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use thiserror::Error;

use crate::app::deps::{
    AppConfig, AppContext, AppDependencies, DynPresenceRegistry, DynUserDirectory,
};
use crate::app::services::OnlineUsersService;
use crate::client::ClientInner;
use crate::infra::events::ImmediateClientEventDispatcher;
use crate::infra::user_info::InMemoryUserDirectory;
use crate::{Client, ClientDelegate};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClientBuilderError {
    #[error("A PresenceRegistry is required to build a Client.")]
    MissingPresenceRegistry,
}

pub struct ClientBuilder {
    config: AppConfig,
    delegates: Vec<Arc<dyn ClientDelegate>>,
    presence_registry: Option<DynPresenceRegistry>,
    user_directory: Option<DynUserDirectory>,
}

impl ClientBuilder {
    pub(crate) fn new() -> Self {
        ClientBuilder {
            config: Default::default(),
            delegates: vec![],
            presence_registry: None,
            user_directory: None,
        }
    }

    pub fn set_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    pub fn set_presence_registry(mut self, presence_registry: DynPresenceRegistry) -> Self {
        self.presence_registry = Some(presence_registry);
        self
    }

    /// Replaces the default `InMemoryUserDirectory`.
    pub fn set_user_directory(mut self, user_directory: DynUserDirectory) -> Self {
        self.user_directory = Some(user_directory);
        self
    }

    pub fn add_delegate(mut self, delegate: Arc<dyn ClientDelegate>) -> Self {
        self.delegates.push(delegate);
        self
    }

    pub fn build(self) -> Result<Client, ClientBuilderError> {
        let presence_registry = self
            .presence_registry
            .ok_or(ClientBuilderError::MissingPresenceRegistry)?;

        let ctx = Arc::new(AppContext::new(self.config));
        let user_directory: DynUserDirectory = match self.user_directory {
            Some(user_directory) => user_directory,
            None => Arc::new(InMemoryUserDirectory::new(ctx.clone())),
        };

        let client_event_dispatcher = Arc::new(ImmediateClientEventDispatcher::new());
        for delegate in self.delegates {
            client_event_dispatcher.add_delegate(delegate);
        }

        let dependencies = AppDependencies {
            client_event_dispatcher: client_event_dispatcher.clone(),
            ctx: ctx.clone(),
            presence_registry,
            user_directory: user_directory.clone(),
        };

        let inner = Arc::new(ClientInner {
            online_users: OnlineUsersService::from(&dependencies),
            ctx,
            client_event_dispatcher,
            user_directory,
        });

        Ok(Client::from(inner))
    }
}
