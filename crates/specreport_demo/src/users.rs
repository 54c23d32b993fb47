//! In-memory user store.
//!
//! Ids start at 1 and are never reused while the store lives; `clear()` starts numbering again.

use chrono::{DateTime, Utc};

use crate::errors::UserError;

/// A stored user.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub age: Option<u32>,
    pub created_at: DateTime<Utc>,
}

/// Fields accepted by [`UserService::add_user`].
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub age: Option<u32>,
}

impl NewUser {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            age: None,
        }
    }

    pub fn with_age(mut self, age: u32) -> Self {
        self.age = Some(age);
        self
    }
}

/// Partial update for [`UserService::update_user`]; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub age: Option<u32>,
}

#[derive(Debug)]
pub struct UserService {
    users: Vec<User>,
    next_id: u64,
}

impl Default for UserService {
    fn default() -> Self {
        Self::new()
    }
}

impl UserService {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            next_id: 1,
        }
    }

    /// Store a new user and return a copy of it.
    ///
    /// ## Errors
    ///
    /// Returns [`UserError::MissingFields`] if `name` or `email` is empty.
    pub fn add_user(&mut self, user: NewUser) -> Result<User, UserError> {
        if user.name.is_empty() || user.email.is_empty() {
            return Err(UserError::MissingFields);
        }
        let stored = User {
            id: self.next_id,
            name: user.name,
            email: user.email,
            age: user.age,
            created_at: Utc::now(),
        };
        self.next_id += 1;
        tracing::debug!(id = stored.id, "user added");
        self.users.push(stored.clone());
        Ok(stored)
    }

    pub fn get_user(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    /// Snapshot of every stored user, in insertion order.
    pub fn all_users(&self) -> Vec<User> {
        self.users.clone()
    }

    /// Apply `update` to the user with `id` and return the updated copy.
    ///
    /// ## Errors
    ///
    /// Returns [`UserError::NotFound`] if no user has this id.
    pub fn update_user(&mut self, id: u64, update: UserUpdate) -> Result<User, UserError> {
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserError::NotFound(id))?;
        if let Some(name) = update.name {
            user.name = name;
        }
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(age) = update.age {
            user.age = Some(age);
        }
        Ok(user.clone())
    }

    /// Remove the user with `id`. Returns `false` if there was none.
    pub fn delete_user(&mut self, id: u64) -> bool {
        match self.users.iter().position(|u| u.id == id) {
            Some(idx) => {
                self.users.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.users.clear();
        self.next_id = 1;
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
