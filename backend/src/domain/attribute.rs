//! Tags and ingredients: the per-user labels a recipe can reference.
//!
//! Both share one shape, `{id, owner, name}`, and the same name rules.
//! Names are not unique per owner.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::user::UserId;

/// Maximum length, in characters, of a tag or ingredient name.
pub const ATTRIBUTE_NAME_MAX: usize = 255;

/// Validation errors for tag and ingredient names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttributeValidationError {
    /// Name was missing or blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// Name exceeded [`ATTRIBUTE_NAME_MAX`] characters.
    #[error("name must be at most {max} characters")]
    NameTooLong { max: usize },
}

/// Validated tag or ingredient name.
///
/// # Examples
/// ```
/// use recipe_backend::domain::AttributeName;
///
/// let name = AttributeName::new("  Dessert ").expect("valid name");
/// assert_eq!(name.as_ref(), "Dessert");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AttributeName(String);

impl AttributeName {
    /// Trim and validate a raw name.
    pub fn new(name: impl AsRef<str>) -> Result<Self, AttributeValidationError> {
        let trimmed = name.as_ref().trim();
        if trimmed.is_empty() {
            return Err(AttributeValidationError::EmptyName);
        }
        if trimmed.chars().count() > ATTRIBUTE_NAME_MAX {
            return Err(AttributeValidationError::NameTooLong {
                max: ATTRIBUTE_NAME_MAX,
            });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for AttributeName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<AttributeName> for String {
    fn from(value: AttributeName) -> Self {
        value.0
    }
}

impl TryFrom<String> for AttributeName {
    type Error = AttributeValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Store-assigned tag identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(i64);

impl TagId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Store-assigned ingredient identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientId(i64);

impl IngredientId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for IngredientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A label a user attaches to recipes, e.g. "Vegan".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    id: TagId,
    owner: UserId,
    name: AttributeName,
}

impl Tag {
    /// Assemble a tag from persisted parts.
    pub fn new(id: TagId, owner: UserId, name: AttributeName) -> Self {
        Self { id, owner, name }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> TagId {
        self.id
    }

    /// Owning user.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Display name.
    pub fn name(&self) -> &AttributeName {
        &self.name
    }
}

/// An ingredient a user lists on recipes, e.g. "Cinnamon".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ingredient {
    id: IngredientId,
    owner: UserId,
    name: AttributeName,
}

impl Ingredient {
    /// Assemble an ingredient from persisted parts.
    pub fn new(id: IngredientId, owner: UserId, name: AttributeName) -> Self {
        Self { id, owner, name }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> IngredientId {
        self.id
    }

    /// Owning user.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Display name.
    pub fn name(&self) -> &AttributeName {
        &self.name
    }
}
