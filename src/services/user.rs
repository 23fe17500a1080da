//! User service

use crate::error::{FamError, FamResult};
use crate::models::{User, UserId};
use crate::storage::Storage;

/// Service for looking up users
pub struct UserService<'a> {
    storage: &'a Storage,
}

impl<'a> UserService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Get a user by ID
    pub fn get(&self, id: UserId) -> FamResult<Option<User>> {
        self.storage.users.get(id)
    }

    /// Find a user by name (case-insensitive) or ID string
    pub fn find(&self, identifier: &str) -> FamResult<Option<User>> {
        if let Some(user) = self.storage.users.get_by_name(identifier)? {
            return Ok(Some(user));
        }

        if let Ok(id) = identifier.trim().parse::<UserId>() {
            return self.storage.users.get(id);
        }

        Ok(None)
    }

    /// Like `find`, but a missing user is an error
    pub fn require(&self, identifier: &str) -> FamResult<User> {
        self.find(identifier)?
            .ok_or_else(|| FamError::user_not_found(identifier.trim()))
    }

    /// All users, ordered by name
    pub fn list(&self) -> FamResult<Vec<User>> {
        self.storage.users.get_all()
    }
}
