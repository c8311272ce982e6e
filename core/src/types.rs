//! Domain DTOs for the user API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::http::RequestEnvelope;

/// A single user returned by the API. Immutable once decoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct User {
    user_id: i64,
    name: String,
    comment: String,
}

impl User {
    pub fn new(user_id: i64, name: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            comment: comment.into(),
        }
    }

    pub fn user_id(&self) -> i64 {
        self.user_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}

/// Wire keys of a `User`, used to build request envelopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserKey {
    UserId,
    Name,
    Comment,
}

impl UserKey {
    pub const ALL: [UserKey; 3] = [UserKey::UserId, UserKey::Name, UserKey::Comment];

    pub fn as_str(self) -> &'static str {
        match self {
            UserKey::UserId => "user_id",
            UserKey::Name => "name",
            UserKey::Comment => "comment",
        }
    }
}

impl fmt::Display for UserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Response body of the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserList {
    pub users: Vec<User>,
}

/// Request payload for the store endpoint. All fields travel as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub user_id: String,
    pub name: String,
    pub comment: String,
}

impl NewUser {
    pub fn new(user_id: &str, name: &str, comment: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            name: name.to_string(),
            comment: comment.to_string(),
        }
    }

    /// Flatten into the string map sent on the wire.
    pub fn to_envelope(&self) -> RequestEnvelope {
        UserKey::ALL
            .iter()
            .map(|key| {
                let value = match key {
                    UserKey::UserId => &self.user_id,
                    UserKey::Name => &self.name,
                    UserKey::Comment => &self.comment,
                };
                (key.as_str().to_string(), value.clone())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn user_decodes_snake_case_id() {
        let user: User =
            serde_json::from_str(r#"{"user_id":7,"name":"Bob","comment":"hello"}"#).unwrap();
        assert_eq!(user, User::new(7, "Bob", "hello"));
    }

    #[test]
    fn user_rejects_missing_field() {
        let result: Result<User, _> = serde_json::from_str(r#"{"user_id":7,"name":"Bob"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn user_rejects_string_id() {
        let result: Result<User, _> =
            serde_json::from_str(r#"{"user_id":"7","name":"Bob","comment":""}"#);
        assert!(result.is_err());
    }

    #[test]
    fn user_ignores_unknown_keys() {
        let user: User = serde_json::from_str(
            r#"{"user_id":1,"name":"A","comment":"c","created_at":"2022-05-21"}"#,
        )
        .unwrap();
        assert_eq!(user.user_id(), 1);
    }

    #[test]
    fn user_hash_covers_every_field() {
        let mut set = HashSet::new();
        set.insert(User::new(1, "A", "x"));
        set.insert(User::new(1, "A", "y"));
        set.insert(User::new(1, "A", "x"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn new_user_envelope_has_exactly_three_keys() {
        let envelope = NewUser::new("3", "Carol", "hey").to_envelope();
        assert_eq!(envelope.len(), 3);
        assert_eq!(envelope["user_id"], "3");
        assert_eq!(envelope["name"], "Carol");
        assert_eq!(envelope["comment"], "hey");
    }
}
