//! User account records and the account form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::Result;

pub type UserId = i64;

/// An account as returned by the users resource
///
/// Same camelCase wire names as tasks; snake_case timestamps are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(alias = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(alias = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

/// Body of a create request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Body of an update request; absent fields are left unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Whether the form creates a new account or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Create,
    Edit(UserId),
}

/// A validated form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserSubmission {
    Create(NewUser),
    Update(UserId, UserUpdate),
}

/// Account form inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl UserForm {
    /// Fill the form from an existing account. The password is never
    /// prefilled.
    pub fn seed(&mut self, user: &User) {
        self.name = user.name.clone();
        self.email = user.email.clone();
        self.password.clear();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Check required fields for `mode`. Edit mode does not collect a
    /// password.
    pub fn validate(&self, mode: FormMode) -> Result<UserSubmission> {
        if self.name.trim().is_empty() {
            return Err(Error::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(Error::MissingField("email"));
        }

        match mode {
            FormMode::Create => {
                if self.password.is_empty() {
                    return Err(Error::MissingField("password"));
                }
                Ok(UserSubmission::Create(NewUser {
                    name: self.name.clone(),
                    email: self.email.clone(),
                    password: self.password.clone(),
                }))
            }
            FormMode::Edit(id) => Ok(UserSubmission::Update(
                id,
                UserUpdate {
                    name: Some(self.name.clone()),
                    email: Some(self.email.clone()),
                },
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        let now = Utc::now();
        User {
            id: 3,
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_seed_clears_password() {
        let mut form = UserForm {
            password: "secret".to_string(),
            ..Default::default()
        };
        form.seed(&user());
        assert_eq!(form.name, "Ada");
        assert_eq!(form.email, "ada@example.com");
        assert!(form.password.is_empty());
    }

    #[test]
    fn test_create_requires_password() {
        let mut form = UserForm::default();
        form.seed(&user());
        assert_eq!(
            form.validate(FormMode::Create),
            Err(Error::MissingField("password"))
        );

        form.password = "hunter2".to_string();
        match form.validate(FormMode::Create).unwrap() {
            UserSubmission::Create(new_user) => assert_eq!(new_user.password, "hunter2"),
            other => panic!("Expected create submission, got: {:?}", other),
        }
    }

    #[test]
    fn test_edit_skips_password() {
        let mut form = UserForm::default();
        form.seed(&user());
        assert_eq!(
            form.validate(FormMode::Edit(3)),
            Ok(UserSubmission::Update(
                3,
                UserUpdate {
                    name: Some("Ada".to_string()),
                    email: Some("ada@example.com".to_string()),
                }
            ))
        );
    }

    #[test]
    fn test_missing_name_and_email() {
        let form = UserForm::default();
        assert_eq!(
            form.validate(FormMode::Edit(1)),
            Err(Error::MissingField("name"))
        );
        let form = UserForm {
            name: "Ada".to_string(),
            ..Default::default()
        };
        assert_eq!(
            form.validate(FormMode::Create),
            Err(Error::MissingField("email"))
        );
    }

    #[test]
    fn test_update_omits_absent_fields() {
        let update = UserUpdate {
            name: Some("Bo".to_string()),
            email: None,
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({ "name": "Bo" }));
    }

    #[test]
    fn test_user_wire_names_match_tasks() {
        let value = serde_json::to_value(user()).unwrap();
        assert!(value["createdAt"].is_string());
        assert!(value["updatedAt"].is_string());
        assert!(value.get("created_at").is_none());

        let legacy: User = serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Ada",
            "email": "ada@example.com",
            "created_at": "2024-01-02T03:04:05Z",
            "updated_at": "2024-01-02T03:04:05Z"
        }))
        .unwrap();
        assert_eq!(legacy.id, 3);
    }
}
