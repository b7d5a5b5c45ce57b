// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use availability::Availability;
pub use user::{User, UserFlags};

mod availability;
mod user;
