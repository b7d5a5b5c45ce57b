// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use anyhow::Result;

use crate::domain::shared::models::UserId;
use crate::domain::user_info::models::User;

#[cfg_attr(feature = "test", mockall::automock)]
pub trait UserDirectory: Send + Sync {
    /// Returns the cached entity for `user_id` or creates it. Repeated calls with the same
    /// `user_id` return handles to the same entity.
    fn get_or_create_user(&self, user_id: &UserId) -> Result<User>;

    /// Forgets all cached entities, e.g. when the session ends.
    fn clear_cache(&self) -> Result<()>;
}
