use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identity of a user record
pub type UserId = u64;

/// One of the five free-text fields a user record carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserField {
    Name,
    Username,
    Email,
    Phone,
    Website,
}

impl UserField {
    /// All text fields, in display order
    pub const ALL: [UserField; 5] = [
        UserField::Name,
        UserField::Username,
        UserField::Email,
        UserField::Phone,
        UserField::Website,
    ];

    /// The key used on the wire and in `update_field` calls
    pub fn key(self) -> &'static str {
        match self {
            UserField::Name => "name",
            UserField::Username => "username",
            UserField::Email => "email",
            UserField::Phone => "phone",
            UserField::Website => "website",
        }
    }

    /// Column header / form label
    pub fn label(self) -> &'static str {
        match self {
            UserField::Name => "Name",
            UserField::Username => "User Name",
            UserField::Email => "Email Address",
            UserField::Phone => "Phone Number",
            UserField::Website => "Website",
        }
    }

    /// Next field in display order, wrapping around
    pub fn next(self) -> UserField {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous field in display order, wrapping around
    pub fn prev(self) -> UserField {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Returned when a field name is not one of the five known fields
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for UserField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserField::ALL
            .into_iter()
            .find(|f| f.key() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A single user entry
///
/// Unknown fields in the source payload (address, company, ...) are dropped on
/// deserialization. Missing text fields become empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub website: String,
}

impl UserRecord {
    /// Create a record with the given id and all text fields empty
    pub fn empty(id: UserId) -> Self {
        UserRecord {
            id,
            ..Default::default()
        }
    }

    /// Read one text field
    pub fn field(&self, field: UserField) -> &str {
        match field {
            UserField::Name => &self.name,
            UserField::Username => &self.username,
            UserField::Email => &self.email,
            UserField::Phone => &self.phone,
            UserField::Website => &self.website,
        }
    }

    /// Mutable access to one text field
    pub fn field_mut(&mut self, field: UserField) -> &mut String {
        match field {
            UserField::Name => &mut self.name,
            UserField::Username => &mut self.username,
            UserField::Email => &mut self.email,
            UserField::Phone => &mut self.phone,
            UserField::Website => &mut self.website,
        }
    }

    /// Overwrite one text field
    pub fn set_field(&mut self, field: UserField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }
}
