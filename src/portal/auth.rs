//! Mock account directory
//!
//! Two demo accounts, checked in memory. There is no backend; a match simply
//! yields the stored [`User`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Resident,
}

/// A signed-in account as stored in the session file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub role: Role,
    pub name: String,
    pub apartment_number: Option<String>,
    pub floor: Option<u32>,
    pub purchase_date: Option<String>,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid email or password. Please try again.")]
    InvalidCredentials,
    #[error("Please enter your email and password.")]
    MissingFields,
}

struct Account {
    password: &'static str,
    user: User,
}

/// In-memory account list used by the login form
pub struct MockDirectory {
    accounts: Vec<Account>,
}

impl Default for MockDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDirectory {
    pub fn new() -> Self {
        Self {
            accounts: vec![
                Account {
                    password: "admin123",
                    user: User {
                        id: "1".into(),
                        email: "admin@chermiti.com".into(),
                        role: Role::Admin,
                        name: "Admin User".into(),
                        apartment_number: None,
                        floor: None,
                        purchase_date: None,
                        status: "Administrator".into(),
                    },
                },
                Account {
                    password: "user123",
                    user: User {
                        id: "2".into(),
                        email: "john@example.com".into(),
                        role: Role::Resident,
                        name: "John Smith".into(),
                        apartment_number: Some("A-2501".into()),
                        floor: Some(25),
                        purchase_date: Some("2024-01-15".into()),
                        status: "Owner".into(),
                    },
                },
            ],
        }
    }

    /// Returns the account whose email and password both match exactly
    pub fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }
        self.accounts
            .iter()
            .find(|account| account.user.email == email.trim() && account.password == password)
            .map(|account| account.user.clone())
            .ok_or(AuthError::InvalidCredentials)
    }

    /// Demo credentials shown under the login form
    pub fn demo_credentials(&self) -> impl Iterator<Item = (Role, &str, &str)> {
        self.accounts
            .iter()
            .map(|a| (a.user.role, a.user.email.as_str(), a.password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_and_resident_log_in_with_their_roles() {
        let directory = MockDirectory::new();
        let admin = directory.authenticate("admin@chermiti.com", "admin123").unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.apartment_number, None);

        let resident = directory.authenticate("john@example.com", "user123").unwrap();
        assert_eq!(resident.role, Role::Resident);
        assert_eq!(resident.floor, Some(25));
    }

    #[test]
    fn wrong_password_is_rejected() {
        let directory = MockDirectory::new();
        let err = directory.authenticate("john@example.com", "admin123").unwrap_err();
        assert_eq!(err, AuthError::InvalidCredentials);
        assert_eq!(err.to_string(), "Invalid email or password. Please try again.");
        assert_eq!(
            directory.authenticate("", "user123"),
            Err(AuthError::MissingFields)
        );
    }

    #[test]
    fn user_serializes_with_camel_case_keys() {
        let user = MockDirectory::new()
            .authenticate("john@example.com", "user123")
            .unwrap();
        let json = serde_json::to_string(&user).unwrap();
        assert!(json.contains("\"apartmentNumber\":\"A-2501\""));
        assert!(json.contains("\"role\":\"resident\""));
    }
}
