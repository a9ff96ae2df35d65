use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Idle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub name: String,
    pub status: UserStatus,
    pub connected_at: DateTime<Local>,
}

impl User {
    pub fn new(name: impl Into<String>, status: UserStatus, connected_at: DateTime<Local>) -> Self {
        Self {
            name: name.into(),
            status,
            connected_at,
        }
    }
}

/// Ordered list of users shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Roster {
    users: Vec<User>,
}

impl Roster {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&User> {
        self.users.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.iter()
    }

    pub fn add(&mut self, user: User) {
        self.users.push(user);
    }

    /// Remove the first user with `name`.
    pub fn remove(&mut self, name: &str) -> Option<User> {
        let index = self.users.iter().position(|user| user.name == name)?;
        Some(self.users.remove(index))
    }

    /// Largest valid cursor position; 0 for an empty roster.
    pub fn last_index(&self) -> usize {
        self.users.len().saturating_sub(1)
    }

    pub fn clamp(&self, index: usize) -> usize {
        index.min(self.last_index())
    }
}
