// 👤 User Entity
//
// Users are permanent once created: there is no update or delete path.
// Usernames are unique; the storage engine enforces that on insert.

use crate::schema::{FieldReader, ValidationErrors};
use serde::Serialize;
use serde_json::{json, Value};

/// Stored user. The password is an opaque string and is never serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: u32,
    pub username: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// Insertable user. Only obtainable through the validating constructors,
/// so both fields are always non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub(crate) username: String,
    pub(crate) password: String,
}

impl NewUser {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationErrors> {
        Self::from_json(&json!({
            "username": username.into(),
            "password": password.into(),
        }))
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn from_json(input: &Value) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(input);
        let user = NewUser {
            username: reader.required_text("username"),
            password: reader.required_text("password"),
        };
        reader.finish(user)
    }
}

impl User {
    pub(crate) fn from_new(id: u32, new: NewUser) -> Self {
        User {
            id,
            username: new.username,
            password: new.password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_requires_both_fields() {
        let errors = NewUser::from_json(&json!({ "username": "" })).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors.has_field("username"));
        assert!(errors.has_field("password"));
    }

    #[test]
    fn test_new_rejects_blank_fields() {
        let errors = NewUser::new("", "   ").unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(errors.has_field("username"));
        assert!(errors.has_field("password"));
    }

    #[test]
    fn test_new_accepts_filled_fields() {
        let user = NewUser::new("asha", "s3cret").unwrap();

        assert_eq!(user.username(), "asha");
    }

    #[test]
    fn test_password_not_serialized() {
        let user = User::from_new(1, NewUser::new("asha", "s3cret").unwrap());
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json, json!({ "id": 1, "username": "asha" }));
    }
}
