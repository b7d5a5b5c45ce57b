// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use tracing::{debug, error, info, warn};

use crate::app::deps::{
    AppDependencies, DynClientEventDispatcher, DynPresenceRegistry, DynUserDirectory,
};
use crate::domain::presence::models::{PresenceEvent, PresenceEventKind, PresenceRegistryError};
use crate::domain::presence::services::PresenceEventObserver;
use crate::domain::shared::models::UserId;
use crate::domain::user_info::models::User;
use crate::ClientEvent;

/// Mirrors the entries of the `PresenceRegistry` into a local map of online users.
///
/// The local user is never contained in the map. While the service is off, the map is empty.
#[derive(Clone)]
pub struct OnlineUsersService {
    inner: Arc<OnlineUsersServiceInner>,
}

struct OnlineUsersServiceInner {
    client_event_dispatcher: DynClientEventDispatcher,
    presence_registry: DynPresenceRegistry,
    user_directory: DynUserDirectory,
    state: RwLock<OnlineUsersState>,
}

#[derive(Default)]
struct OnlineUsersState {
    is_on: bool,
    online_users: HashMap<UserId, User>,
}

impl From<&AppDependencies> for OnlineUsersService {
    fn from(deps: &AppDependencies) -> Self {
        Self::new(
            deps.presence_registry.clone(),
            deps.user_directory.clone(),
            deps.client_event_dispatcher.clone(),
        )
    }
}

impl OnlineUsersService {
    pub fn new(
        presence_registry: DynPresenceRegistry,
        user_directory: DynUserDirectory,
        client_event_dispatcher: DynClientEventDispatcher,
    ) -> Self {
        Self {
            inner: Arc::new(OnlineUsersServiceInner {
                client_event_dispatcher,
                presence_registry,
                user_directory,
                state: Default::default(),
            }),
        }
    }

    /// Subscribes to the presence registry. Does nothing if the service is already on.
    #[tracing::instrument(skip(self))]
    pub fn on(&self) {
        {
            let mut state = self.inner.state.write();
            if state.is_on {
                return;
            }
            state.is_on = true;
        }

        // Registries may replay their current entries from within `subscribe`, so the state lock
        // must not be held here. `Added` goes last so that a replay only starts once both
        // observers are in place.
        let service = Arc::downgrade(&self.inner);
        self.inner.presence_registry.subscribe(
            PresenceEventKind::Removed,
            Arc::new(OnlineUserRemovedObserver {
                service: service.clone(),
            }),
        );
        self.inner.presence_registry.subscribe(
            PresenceEventKind::Added,
            Arc::new(OnlineUserAddedObserver { service }),
        );

        // A delegate might have turned us off while the entries were replayed.
        if !self.is_on() {
            self.unsubscribe();
        }
    }

    /// Unsubscribes from the presence registry and forgets all online users. Their `blocked`
    /// and `friend` flags are reset so that they don't leak into the next session.
    #[tracing::instrument(skip(self))]
    pub fn off(&self) {
        let online_users = {
            let mut state = self.inner.state.write();
            state.is_on = false;
            std::mem::take(&mut state.online_users)
        };

        for user in online_users.values() {
            user.set_blocked(false);
            user.set_friend(false);
            user.set_online(false);
        }

        self.unsubscribe();
    }

    pub fn is_on(&self) -> bool {
        self.inner.state.read().is_on
    }

    /// Adds `user` to the online users and dispatches `ClientEvent::OnlineUserAdded`.
    ///
    /// Returns false without doing anything if `user` has no id, is the local user or if the
    /// service is off. Adding a user that is already online dispatches the event again.
    pub fn add_online_user(&self, user: &User) -> bool {
        self.inner.add_online_user(user)
    }

    pub fn remove_online_user(&self, user: &User) {
        self.inner.remove_online_user(user)
    }

    /// Removes the user with `user_id` and dispatches `ClientEvent::OnlineUserRemoved` if the
    /// user was online.
    pub fn remove_online_user_with_id(&self, user_id: &UserId) {
        self.inner.remove_online_user_with_id(user_id)
    }

    pub fn online_user_count(&self) -> usize {
        self.inner.state.read().online_users.len()
    }

    /// Returns a snapshot of the online users.
    pub fn online_users(&self) -> HashMap<UserId, User> {
        self.inner.state.read().online_users.clone()
    }

    pub fn online_user_ids(&self) -> Vec<UserId> {
        self.inner
            .state
            .read()
            .online_users
            .keys()
            .cloned()
            .collect()
    }

    pub fn online_user(&self, user_id: &UserId) -> Option<User> {
        self.inner.state.read().online_users.get(user_id).cloned()
    }

    pub fn is_user_online(&self, user_id: &UserId) -> bool {
        self.inner.state.read().online_users.contains_key(user_id)
    }
}

impl OnlineUsersService {
    fn unsubscribe(&self) {
        self.inner
            .presence_registry
            .unsubscribe(PresenceEventKind::Added);
        self.inner
            .presence_registry
            .unsubscribe(PresenceEventKind::Removed);
    }
}

impl OnlineUsersServiceInner {
    fn add_online_user(&self, user: &User) -> bool {
        let Some(user_id) = user.id() else {
            return false;
        };

        if user.is_me() {
            return false;
        }

        {
            let mut state = self.state.write();
            if !state.is_on {
                return false;
            }
            user.set_online(true);
            state.online_users.insert(user_id.clone(), user.clone());
        }

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::OnlineUserAdded);
        true
    }

    fn remove_online_user(&self, user: &User) {
        let Some(user_id) = user.id() else {
            return;
        };
        self.remove_online_user_with_id(user_id)
    }

    fn remove_online_user_with_id(&self, user_id: &UserId) {
        {
            let mut state = self.state.write();
            let Some(user) = state.online_users.remove(user_id) else {
                return;
            };
            user.set_online(false);
        }

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::OnlineUserRemoved);
    }

    fn is_on(&self) -> bool {
        self.state.read().is_on
    }

    fn resolve_user(&self, user_id: &UserId) -> Option<User> {
        match self.user_directory.get_or_create_user(user_id) {
            Ok(user) => Some(user),
            Err(err) => {
                warn!("Dropping presence event. Failed to resolve user {user_id}. {err}");
                None
            }
        }
    }

    fn handle_user_added(&self, event: PresenceEvent) {
        if !self.is_on() {
            debug!("Ignoring late presence entry {:?}.", event.key);
            return;
        }

        if !event.has_value() {
            debug!("Ignoring presence entry {:?} without value.", event.key);
            return;
        }

        let Some(user_id) = event.user_id() else {
            debug!("Ignoring presence entry without valid key.");
            return;
        };

        info!("Online: {user_id}");

        let Some(user) = self.resolve_user(&user_id) else {
            return;
        };

        if self.add_online_user(&user) {
            self.client_event_dispatcher
                .dispatch_event(ClientEvent::UserOnlineStateChanged { user });
        }
    }

    fn handle_user_removed(&self, event: PresenceEvent) {
        if !self.is_on() {
            debug!("Ignoring late removal of presence entry {:?}.", event.key);
            return;
        }

        let Some(user_id) = event.user_id() else {
            debug!("Ignoring removed presence entry without valid key.");
            return;
        };

        info!("Offline: {user_id}");

        let Some(user) = self.resolve_user(&user_id) else {
            return;
        };

        user.off();
        self.remove_online_user(&user);

        self.client_event_dispatcher
            .dispatch_event(ClientEvent::UserOnlineStateChanged { user });
    }

    fn handle_registry_error(&self, kind: PresenceEventKind, error: PresenceRegistryError) {
        error!("Presence registry failed to deliver {kind} events. {error}");
    }
}

struct OnlineUserAddedObserver {
    service: Weak<OnlineUsersServiceInner>,
}

impl PresenceEventObserver for OnlineUserAddedObserver {
    fn handle_event(&self, event: PresenceEvent) {
        let Some(service) = self.service.upgrade() else {
            return;
        };
        service.handle_user_added(event)
    }

    fn handle_error(&self, error: PresenceRegistryError) {
        let Some(service) = self.service.upgrade() else {
            return;
        };
        service.handle_registry_error(PresenceEventKind::Added, error)
    }
}

struct OnlineUserRemovedObserver {
    service: Weak<OnlineUsersServiceInner>,
}

impl PresenceEventObserver for OnlineUserRemovedObserver {
    fn handle_event(&self, event: PresenceEvent) {
        let Some(service) = self.service.upgrade() else {
            return;
        };
        service.handle_user_removed(event)
    }

    fn handle_error(&self, error: PresenceRegistryError) {
        let Some(service) = self.service.upgrade() else {
            return;
        };
        service.handle_registry_error(PresenceEventKind::Removed, error)
    }
}
