// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

use crate::domain::user_info::models::User;

#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    /// A user was added to the online users.
    OnlineUserAdded,

    /// A user was removed from the online users.
    OnlineUserRemoved,

    /// The registry reported that `user` came online or went offline.
    UserOnlineStateChanged { user: User },
}
