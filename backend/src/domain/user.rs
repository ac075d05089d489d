//! User data model.
//!
//! A user owns every tag, ingredient, and recipe it creates. Users are
//! identified by a UUID and log in with their email address.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum length, in characters, of an email address.
pub const EMAIL_MAX: usize = 255;
/// Maximum length, in characters, of a display name.
pub const DISPLAY_NAME_MAX: usize = 255;

/// Validation errors returned by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyId,
    InvalidId,
    EmptyEmail,
    InvalidEmail,
    EmailTooLong { max: usize },
    EmptyDisplayName,
    DisplayNameTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "user id must not be empty"),
            Self::InvalidId => write!(f, "user id must be a valid UUID"),
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::InvalidEmail => write!(f, "email must look like name@domain"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::EmptyDisplayName => write!(f, "name must not be empty"),
            Self::DisplayNameTooLong { max } => {
                write!(f, "name must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(Uuid, String);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        Self::from_owned(id.as_ref().to_owned())
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid, uuid.to_string())
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    fn from_owned(id: String) -> Result<Self, UserValidationError> {
        if id.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        if id.trim() != id {
            return Err(UserValidationError::InvalidId);
        }

        let parsed = Uuid::parse_str(&id).map_err(|_| UserValidationError::InvalidId)?;
        Ok(Self(parsed, id))
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl AsRef<str> for UserId {
    fn as_ref(&self) -> &str {
        self.1.as_str()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<UserId> for String {
    fn from(value: UserId) -> Self {
        let UserId(_, raw) = value;
        raw
    }
}

impl TryFrom<String> for UserId {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_owned(value)
    }
}

/// Login email address.
///
/// ## Invariants
/// - Trimmed, at most [`EMAIL_MAX`] characters.
/// - Exactly one `@` with a non-empty local part and domain.
/// - The domain is stored lower-cased; the local part is kept verbatim.
///
/// # Examples
/// ```
/// use recipe_backend::domain::Email;
///
/// let email = Email::new(" Cook@Example.COM ").expect("valid email");
/// assert_eq!(email.as_ref(), "Cook@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and normalise an email address.
    pub fn new(email: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = email.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Err(UserValidationError::InvalidEmail);
        };
        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || trimmed.chars().any(char::is_whitespace)
        {
            return Err(UserValidationError::InvalidEmail);
        }

        Ok(Self(format!("{local}@{}", domain.to_lowercase())))
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Human readable name for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DisplayName(String);

impl DisplayName {
    /// Validate and construct a [`DisplayName`].
    pub fn new(display_name: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = display_name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyDisplayName);
        }
        if trimmed.chars().count() > DISPLAY_NAME_MAX {
            return Err(UserValidationError::DisplayNameTooLong {
                max: DISPLAY_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for DisplayName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<DisplayName> for String {
    fn from(value: DisplayName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Application user.
///
/// Serialised as `{"id", "email", "name"}`. Password material never lives
/// on this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    email: Email,
    name: DisplayName,
}

impl User {
    /// Build a new [`User`] from validated components.
    pub fn new(id: UserId, email: Email, name: DisplayName) -> Self {
        Self { id, email, name }
    }

    /// Fallible constructor for raw string inputs.
    pub fn try_from_strings(
        id: impl AsRef<str>,
        email: impl AsRef<str>,
        name: impl AsRef<str>,
    ) -> Result<Self, UserValidationError> {
        Ok(Self::new(
            UserId::new(id)?,
            Email::new(email)?,
            DisplayName::new(name)?,
        ))
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Login email address.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Display name.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }
}

#[cfg(test)]
mod tests;
