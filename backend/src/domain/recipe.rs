//! Recipe aggregate and its validated scalar values.
//!
//! A recipe belongs to exactly one user and references tags and ingredients
//! owned by that same user. Associations have set semantics.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::attribute::{Ingredient, IngredientId, Tag, TagId};
use super::user::UserId;

/// Maximum length, in characters, of a recipe title.
pub const TITLE_MAX: usize = 255;
/// Maximum length, in characters, of a recipe link.
pub const LINK_MAX: usize = 255;
/// Total significant digits a price may carry.
pub const PRICE_MAX_DIGITS: u32 = 5;
/// Decimal places a price is stored with.
pub const PRICE_DECIMAL_PLACES: u32 = 2;

/// Validation errors for recipe fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeValidationError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("title must be at most {max} characters")]
    TitleTooLong { max: usize },
    #[error("time_minutes must be a non-negative integer no larger than {max}")]
    TimeOutOfRange { max: i64 },
    #[error("price must be a decimal number")]
    InvalidPrice,
    #[error("price must not be negative")]
    NegativePrice,
    #[error("price must have no more than {max} decimal places")]
    PriceTooPrecise { max: u32 },
    #[error("price must have no more than {max} digits in total")]
    PriceTooLarge { max: u32 },
    #[error("link must be at most {max} characters")]
    LinkTooLong { max: usize },
}

/// Store-assigned recipe identifier; later recipes get larger ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(i64);

impl RecipeId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-empty recipe title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeTitle(String);

impl RecipeTitle {
    /// Trim and validate a raw title.
    pub fn new(title: impl AsRef<str>) -> Result<Self, RecipeValidationError> {
        let trimmed = title.as_ref().trim();
        if trimmed.is_empty() {
            return Err(RecipeValidationError::EmptyTitle);
        }
        if trimmed.chars().count() > TITLE_MAX {
            return Err(RecipeValidationError::TitleTooLong { max: TITLE_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for RecipeTitle {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Preparation time in whole minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PreparationMinutes(i32);

impl PreparationMinutes {
    /// Accept any value in `0..=i32::MAX`.
    pub fn new(minutes: i64) -> Result<Self, RecipeValidationError> {
        i32::try_from(minutes)
            .ok()
            .filter(|value| *value >= 0)
            .map(Self)
            .ok_or(RecipeValidationError::TimeOutOfRange {
                max: i64::from(i32::MAX),
            })
    }

    /// Minutes as stored.
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Non-negative price with two decimal places, at most `999.99`.
///
/// # Examples
/// ```
/// use recipe_backend::domain::Price;
///
/// let price: Price = "5".parse().expect("valid price");
/// assert_eq!(price.to_string(), "5.00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Price(Decimal);

impl Price {
    /// Validate a decimal amount and rescale it to two places.
    pub fn new(amount: Decimal) -> Result<Self, RecipeValidationError> {
        if amount.is_zero() {
            return Ok(Self(Decimal::new(0, PRICE_DECIMAL_PLACES)));
        }
        if amount.is_sign_negative() {
            return Err(RecipeValidationError::NegativePrice);
        }

        let mut amount = amount.normalize();
        if amount.scale() > PRICE_DECIMAL_PLACES {
            return Err(RecipeValidationError::PriceTooPrecise {
                max: PRICE_DECIMAL_PLACES,
            });
        }
        amount.rescale(PRICE_DECIMAL_PLACES);

        // 10^(max_digits) hundredths, i.e. 1000.00 for five digits.
        let ceiling = Decimal::new(10_i64.pow(PRICE_MAX_DIGITS), PRICE_DECIMAL_PLACES);
        if amount >= ceiling {
            return Err(RecipeValidationError::PriceTooLarge {
                max: PRICE_MAX_DIGITS,
            });
        }
        Ok(Self(amount))
    }

    /// The amount with scale two.
    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl FromStr for Price {
    type Err = RecipeValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str(s.trim()).map_err(|_| RecipeValidationError::InvalidPrice)?;
        Self::new(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Optional external link, empty when absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipeLink(String);

impl RecipeLink {
    /// Trim and validate a raw link; empty input is allowed.
    pub fn new(link: impl AsRef<str>) -> Result<Self, RecipeValidationError> {
        let trimmed = link.as_ref().trim();
        if trimmed.chars().count() > LINK_MAX {
            return Err(RecipeValidationError::LinkTooLong { max: LINK_MAX });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for RecipeLink {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Validated input for creating a recipe.
///
/// Tag and ingredient ids are collected into sets, so duplicates collapse.
/// Ownership of the referenced ids is checked by the repository when the
/// recipe is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeDraft {
    title: RecipeTitle,
    time_minutes: PreparationMinutes,
    price: Price,
    link: RecipeLink,
    tag_ids: BTreeSet<TagId>,
    ingredient_ids: BTreeSet<IngredientId>,
}

impl RecipeDraft {
    /// Bundle validated scalars with the requested associations.
    pub fn new(
        title: RecipeTitle,
        time_minutes: PreparationMinutes,
        price: Price,
        link: RecipeLink,
    ) -> Self {
        Self {
            title,
            time_minutes,
            price,
            link,
            tag_ids: BTreeSet::new(),
            ingredient_ids: BTreeSet::new(),
        }
    }

    /// Reference the given tags.
    pub fn with_tags(mut self, ids: impl IntoIterator<Item = TagId>) -> Self {
        self.tag_ids.extend(ids);
        self
    }

    /// Reference the given ingredients.
    pub fn with_ingredients(mut self, ids: impl IntoIterator<Item = IngredientId>) -> Self {
        self.ingredient_ids.extend(ids);
        self
    }

    /// Validated title.
    pub fn title(&self) -> &RecipeTitle {
        &self.title
    }

    /// Requested preparation time.
    pub fn time_minutes(&self) -> PreparationMinutes {
        self.time_minutes
    }

    /// Requested price.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Link, empty when none was given.
    pub fn link(&self) -> &RecipeLink {
        &self.link
    }

    /// Requested tag ids, deduplicated.
    pub fn tag_ids(&self) -> &BTreeSet<TagId> {
        &self.tag_ids
    }

    /// Requested ingredient ids, deduplicated.
    pub fn ingredient_ids(&self) -> &BTreeSet<IngredientId> {
        &self.ingredient_ids
    }
}

/// Components of a persisted recipe, as loaded by a repository.
#[derive(Debug, Clone)]
pub struct RecipeParts {
    pub id: RecipeId,
    pub owner: UserId,
    pub title: RecipeTitle,
    pub time_minutes: PreparationMinutes,
    pub price: Price,
    pub link: RecipeLink,
    pub tags: Vec<Tag>,
    pub ingredients: Vec<Ingredient>,
}

/// A persisted recipe with its associations resolved.
///
/// ## Invariants
/// - `tags` and `ingredients` are sorted by id and free of duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    id: RecipeId,
    owner: UserId,
    title: RecipeTitle,
    time_minutes: PreparationMinutes,
    price: Price,
    link: RecipeLink,
    tags: Vec<Tag>,
    ingredients: Vec<Ingredient>,
}

impl Recipe {
    /// Assemble a recipe, normalising association order.
    pub fn from_parts(parts: RecipeParts) -> Self {
        let RecipeParts {
            id,
            owner,
            title,
            time_minutes,
            price,
            link,
            mut tags,
            mut ingredients,
        } = parts;
        tags.sort_by_key(Tag::id);
        tags.dedup_by_key(|tag| tag.id());
        ingredients.sort_by_key(Ingredient::id);
        ingredients.dedup_by_key(|ingredient| ingredient.id());

        Self {
            id,
            owner,
            title,
            time_minutes,
            price,
            link,
            tags,
            ingredients,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> RecipeId {
        self.id
    }

    /// User who owns the recipe.
    pub fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Recipe title.
    pub fn title(&self) -> &RecipeTitle {
        &self.title
    }

    /// Preparation time.
    pub fn time_minutes(&self) -> PreparationMinutes {
        self.time_minutes
    }

    /// Price with two decimal places.
    pub fn price(&self) -> Price {
        self.price
    }

    /// Link, empty when none was stored.
    pub fn link(&self) -> &RecipeLink {
        &self.link
    }

    /// Associated tags, sorted by id.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Associated ingredients, sorted by id.
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }
}
