//! User entity representing a registered account.

use chrono::{DateTime, Utc};

/// A registered user.
///
/// `password_hash` is the salted credential digest produced at signup; the
/// plaintext password never leaves the signup/login handlers. The record is
/// immutable after creation.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new User instance.
    pub fn new(
        id: i64,
        email: String,
        name: String,
        password_hash: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            name,
            password_hash,
            created_at,
        }
    }
}

/// Input data for creating a new user at signup.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_creation() {
        let now = Utc::now();
        let user = User::new(
            1,
            "a@x.com".to_string(),
            "A".to_string(),
            "hmac-sha256$1000$c2FsdA$aGFzaA".to_string(),
            now,
        );

        assert_eq!(user.id, 1);
        assert_eq!(user.email, "a@x.com");
        assert_eq!(user.name, "A");
        assert_eq!(user.created_at, now);
    }

    #[test]
    fn test_new_user_carries_hash_not_plaintext() {
        let new_user = NewUser {
            email: "b@x.com".to_string(),
            name: "B".to_string(),
            password_hash: "hmac-sha256$1000$c2FsdA$aGFzaA".to_string(),
        };

        assert!(new_user.password_hash.starts_with("hmac-sha256$"));
    }
}
