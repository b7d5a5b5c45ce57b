// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use std::collections::HashMap;

use anyhow::Result;
use parking_lot::RwLock;

use crate::app::deps::DynAppContext;
use crate::domain::shared::models::UserId;
use crate::domain::user_info::models::User;
use crate::domain::user_info::repos::UserDirectory;

pub struct InMemoryUserDirectory {
    ctx: DynAppContext,
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserDirectory {
    pub fn new(ctx: DynAppContext) -> Self {
        Self {
            ctx,
            users: Default::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn get_or_create_user(&self, user_id: &UserId) -> Result<User> {
        if let Some(user) = self.users.read().get(user_id) {
            return Ok(user.clone());
        }

        let account_id = self.ctx.connected_id()?;

        let user = self
            .users
            .write()
            .entry(user_id.clone())
            .or_insert_with(|| User::new(user_id.clone(), user_id == &account_id))
            .clone();

        Ok(user)
    }

    fn clear_cache(&self) -> Result<()> {
        self.users.write().clear();
        Ok(())
    }
}
