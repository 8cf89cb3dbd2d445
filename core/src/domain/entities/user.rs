//! User entity representing a registered user in the ShareIt system.

use serde::{Deserialize, Serialize};

/// A registered user. Users own items, book other users' items and leave
/// comments after completed rentals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier, assigned by the storage layer
    pub id: i64,

    /// Display name
    pub name: String,

    /// Email address, unique across all users (case-sensitive comparison)
    pub email: String,
}

impl User {
    /// Creates a new User. The id is assigned when the entity is persisted.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_has_no_id() {
        let user = User::new("Alice", "alice@example.com");
        assert_eq!(user.id, 0);
        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "alice@example.com");
    }
}
