// prose-core-client/prose-online
//
// Copyright: 2024, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use user_directory::UserDirectory;

mod user_directory;

#[cfg(feature = "test")]
pub mod mocks {
    pub use super::user_directory::MockUserDirectory;
}
