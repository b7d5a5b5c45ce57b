// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::domain::shared::models::UserId;

use super::Availability;

/// A user entity as handed out by a `UserDirectory`.
///
/// `User` is a handle: clones refer to the same entity, so flags set through one clone are
/// visible through every other clone. Two handles are equal if they refer to the same entity.
#[derive(Clone)]
pub struct User {
    inner: Arc<UserInner>,
}

struct UserInner {
    id: Option<UserId>,
    is_me: bool,
    flags: RwLock<UserFlags>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserFlags {
    /// Mirrors whether the user is contained in the online users of an `OnlineUsersService`.
    pub online: bool,
    pub blocked: bool,
    pub friend: bool,
    pub availability: Availability,
}

impl User {
    pub fn new(id: UserId, is_me: bool) -> Self {
        Self::with_id(Some(id), is_me)
    }

    /// An entity whose identifier is not known (yet).
    pub fn unidentified() -> Self {
        Self::with_id(None, false)
    }

    fn with_id(id: Option<UserId>, is_me: bool) -> Self {
        Self {
            inner: Arc::new(UserInner {
                id,
                is_me,
                flags: Default::default(),
            }),
        }
    }
}

impl User {
    pub fn id(&self) -> Option<&UserId> {
        self.inner.id.as_ref()
    }

    /// Returns true if the entity represents the user of the local session.
    pub fn is_me(&self) -> bool {
        self.inner.is_me
    }

    pub fn flags(&self) -> UserFlags {
        *self.inner.flags.read()
    }

    pub fn is_online(&self) -> bool {
        self.inner.flags.read().online
    }

    pub fn set_online(&self, online: bool) {
        self.inner.flags.write().online = online
    }

    pub fn is_blocked(&self) -> bool {
        self.inner.flags.read().blocked
    }

    pub fn set_blocked(&self, blocked: bool) {
        self.inner.flags.write().blocked = blocked
    }

    pub fn is_friend(&self) -> bool {
        self.inner.flags.read().friend
    }

    pub fn set_friend(&self, friend: bool) {
        self.inner.flags.write().friend = friend
    }

    pub fn availability(&self) -> Availability {
        self.inner.flags.read().availability
    }

    pub fn set_availability(&self, availability: Availability) {
        self.inner.flags.write().availability = availability
    }

    /// Moves the entity into its generic offline state.
    pub fn off(&self) {
        self.set_availability(Availability::Unavailable)
    }
}

impl PartialEq for User {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for User {}

impl Debug for User {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("User")
            .field("id", &self.inner.id)
            .field("is_me", &self.inner.is_me)
            .field("flags", &self.flags())
            .finish()
    }
}
