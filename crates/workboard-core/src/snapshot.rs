//! Read-only task/user snapshots exported by the data layer.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{CoreError, Result};
use crate::task::Task;
use crate::user::User;

#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub tasks: Vec<Task>,
}

impl Snapshot {
    /// Load a JSON array of users and a JSON array of tasks.
    pub fn load(users_path: &Path, tasks_path: &Path) -> Result<Self> {
        let users: Vec<User> = read_json_array(users_path)?;
        let tasks: Vec<Task> = read_json_array(tasks_path)?;
        tracing::debug!(users = users.len(), tasks = tasks.len(), "loaded snapshot");
        Ok(Self { users, tasks })
    }

    pub fn from_json(users: &str, tasks: &str) -> Result<Self> {
        Ok(Self {
            users: serde_json::from_str(users)?,
            tasks: serde_json::from_str(tasks)?,
        })
    }
}

fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| CoreError::Custom(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&content)
        .map_err(|e| CoreError::Custom(format!("cannot parse {}: {e}", path.display())))
}
