//! Authentication primitives: login credentials and account registration.
//!
//! Handlers build these from raw request strings before they talk to a port,
//! so services only ever see validated input. Passwords are held in
//! [`Zeroizing`] buffers and wiped on drop.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{DisplayName, Email, UserValidationError};

/// Minimum password length accepted at registration.
pub const PASSWORD_MIN: usize = 5;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing or malformed.
    InvalidEmail(UserValidationError),
    /// Password was empty.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(inner) => write!(f, "{inner}"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is a normalised [`Email`].
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use recipe_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("cook@example.com", "secret")
///     .expect("valid credentials");
/// assert_eq!(creds.email().as_ref(), "cook@example.com");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = Email::new(email).map_err(LoginValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email used to look up the account.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Domain error returned when a registration payload is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Email was missing or malformed.
    InvalidEmail(UserValidationError),
    /// Name was missing or too long.
    InvalidName(UserValidationError),
    /// Password shorter than [`PASSWORD_MIN`].
    PasswordTooShort { min: usize },
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail(inner) | Self::InvalidName(inner) => write!(f, "{inner}"),
            Self::PasswordTooShort { min } => {
                write!(f, "password must be at least {min} characters")
            }
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

/// Validated request to open a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    email: Email,
    name: DisplayName,
    password: Zeroizing<String>,
}

impl Registration {
    /// Validate raw registration inputs.
    pub fn try_from_parts(
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Self, RegistrationValidationError> {
        let email = Email::new(email).map_err(RegistrationValidationError::InvalidEmail)?;
        let name = DisplayName::new(name).map_err(RegistrationValidationError::InvalidName)?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(RegistrationValidationError::PasswordTooShort { min: PASSWORD_MIN });
        }
        Ok(Self {
            email,
            name,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email the account will log in with.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Display name for the account.
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    /// Plain-text password awaiting hashing.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Stored one-way password hash (PHC string format).
///
/// `Debug` output is redacted so hashes never reach logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a password hasher or read from storage.
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(..)")
    }
}
