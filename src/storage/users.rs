//! User repository for JSON storage

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FamError;
use crate::models::{User, UserId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct UserData {
    users: Vec<User>,
}

/// Repository for user persistence
pub struct UserRepository {
    path: PathBuf,
    data: RwLock<HashMap<UserId, User>>,
}

impl UserRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load users from disk
    pub fn load(&self) -> Result<(), FamError> {
        let file_data: UserData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FamError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for user in file_data.users {
            data.insert(user.id, user);
        }

        Ok(())
    }

    /// Save users to disk
    pub fn save(&self) -> Result<(), FamError> {
        let file_data = UserData {
            users: self.get_all()?,
        };

        write_json_atomic(&self.path, &file_data)
    }

    /// Get a user by ID
    pub fn get(&self, id: UserId) -> Result<Option<User>, FamError> {
        let data = self
            .data
            .read()
            .map_err(|e| FamError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all users, ordered by name
    pub fn get_all(&self) -> Result<Vec<User>, FamError> {
        let data = self
            .data
            .read()
            .map_err(|e| FamError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut users: Vec<_> = data.values().cloned().collect();
        users.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(users)
    }

    /// Get a user by name (case-insensitive)
    pub fn get_by_name(&self, name: &str) -> Result<Option<User>, FamError> {
        let data = self
            .data
            .read()
            .map_err(|e| FamError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.trim().to_lowercase();
        Ok(data
            .values()
            .find(|u| u.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Insert or update a user
    pub fn upsert(&self, user: User) -> Result<(), FamError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FamError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(user.id, user);
        Ok(())
    }

    /// Check if a user name is already taken (case-insensitive)
    pub fn name_exists(&self, name: &str) -> Result<bool, FamError> {
        Ok(self.get_by_name(name)?.is_some())
    }

    pub fn count(&self) -> Result<usize, FamError> {
        let data = self
            .data
            .read()
            .map_err(|e| FamError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}
