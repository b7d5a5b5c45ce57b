// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::sync::Arc;

use crate::app::deps::app_context::AppContext;
use crate::app::event_handlers::ClientEventDispatcherTrait;
use crate::domain::presence::services::PresenceRegistry;
use crate::domain::user_info::repos::UserDirectory;

pub type DynAppContext = Arc<AppContext>;
pub type DynClientEventDispatcher = Arc<dyn ClientEventDispatcherTrait>;
pub type DynPresenceRegistry = Arc<dyn PresenceRegistry>;
pub type DynUserDirectory = Arc<dyn UserDirectory>;

pub struct AppDependencies {
    pub client_event_dispatcher: DynClientEventDispatcher,
    pub ctx: DynAppContext,
    pub presence_registry: DynPresenceRegistry,
    pub user_directory: DynUserDirectory,
}
