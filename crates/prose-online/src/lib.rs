// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use app::deps::AppConfig;
pub use app::services::OnlineUsersService;
pub use client::{Client, ClientDelegate};
pub use client_builder::{ClientBuilder, ClientBuilderError};
pub use client_event::ClientEvent;


pub mod app;
mod client;
mod client_builder;
mod client_event;

pub mod domain;
pub mod infra;

pub mod dtos {
    pub use crate::domain::presence::models::{PresenceEvent, PresenceEventKind};
    pub use crate::domain::shared::models::{UserId, UserIdError};
    pub use crate::domain::user_info::models::{Availability, User, UserFlags};
}
