//! A controller that reaches users through the [`UserDirectory`] seam.

use crate::users::{User, UserService};

/// Name reported for ids with no stored user.
pub const UNKNOWN_USER_NAME: &str = "Unknown";

/// Lookup boundary between controllers and the user store.
pub trait UserDirectory {
    fn find_user(&self, id: u64) -> Option<User>;
}

impl UserDirectory for UserService {
    fn find_user(&self, id: u64) -> Option<User> {
        self.get_user(id).cloned()
    }
}

impl<D: UserDirectory + ?Sized> UserDirectory for &D {
    fn find_user(&self, id: u64) -> Option<User> {
        (**self).find_user(id)
    }
}

pub struct UserController<D> {
    directory: D,
}

impl<D: UserDirectory> UserController<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    /// The user's name, or [`UNKNOWN_USER_NAME`] if the directory has no such user.
    pub fn user_name(&self, id: u64) -> String {
        self.directory
            .find_user(id)
            .map(|u| u.name)
            .unwrap_or_else(|| UNKNOWN_USER_NAME.to_string())
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }
}
