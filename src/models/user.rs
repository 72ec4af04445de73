use crate::models::validation::{check_keys, email_field, enum_field, require_non_empty};
use crate::utils::error::ValidationError;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Donor,
    Volunteer,
    Admin,
}

impl Role {
    pub const ALL: [&'static str; 3] = ["donor", "volunteer", "admin"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "donor" => Some(Role::Donor),
            "volunteer" => Some(Role::Volunteer),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Active,
    Blocked,
}

impl AccountStatus {
    pub const ALL: [&'static str; 2] = ["active", "blocked"];

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(AccountStatus::Active),
            "blocked" => Some(AccountStatus::Blocked),
            _ => None,
        }
    }
}

/// Body of `PUT /user`: profile fields keyed by a required email.
#[derive(Debug, Clone)]
pub struct UserUpsert {
    pub email: String,
    pub fields: Map<String, Value>,
}

/// Body of `PATCH /users/update/{email}`: any non-empty set of profile fields.
#[derive(Debug, Clone)]
pub struct UserUpdate {
    pub fields: Map<String, Value>,
}

fn check_profile(fields: &Map<String, Value>) -> Result<(), ValidationError> {
    check_keys(fields)?;
    enum_field(fields, "role", Role::parse, &Role::ALL)?;
    enum_field(fields, "status", AccountStatus::parse, &AccountStatus::ALL)?;
    Ok(())
}

impl TryFrom<Map<String, Value>> for UserUpsert {
    type Error = ValidationError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        check_profile(&fields)?;
        let email = email_field(&fields, "email", "email", true)?
            .ok_or_else(|| ValidationError::new("email", "is required"))?;
        Ok(Self { email, fields })
    }
}

impl TryFrom<Map<String, Value>> for UserUpdate {
    type Error = ValidationError;

    fn try_from(fields: Map<String, Value>) -> Result<Self, Self::Error> {
        require_non_empty(&fields)?;
        check_profile(&fields)?;
        email_field(&fields, "email", "email", false)?;
        Ok(Self { fields })
    }
}
