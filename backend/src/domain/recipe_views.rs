//! Read views of a [`Recipe`].
//!
//! The list endpoint returns summaries, which carry association ids; the
//! retrieve and create endpoints return details, which embed `{id, name}`
//! pairs. Both keep associations in ascending id order.

use serde::Serialize;

use super::attribute::{Ingredient, Tag};
use super::recipe::Recipe;

/// `{id, name}` pair for an embedded tag or ingredient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AttributeView {
    pub id: i64,
    pub name: String,
}

impl From<&Tag> for AttributeView {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id().get(),
            name: tag.name().to_string(),
        }
    }
}

impl From<&Ingredient> for AttributeView {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            id: ingredient.id().get(),
            name: ingredient.name().to_string(),
        }
    }
}

/// Recipe as listed: associations as bare ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub time_minutes: i32,
    pub price: String,
    pub link: String,
    pub tags: Vec<i64>,
    pub ingredients: Vec<i64>,
}

/// Recipe as retrieved: associations embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeDetail {
    pub id: i64,
    pub title: String,
    pub time_minutes: i32,
    pub price: String,
    pub link: String,
    pub tags: Vec<AttributeView>,
    pub ingredients: Vec<AttributeView>,
}

/// Project a recipe onto its list view.
///
/// # Examples
/// ```
/// use recipe_backend::domain::{
///     summary_view, PreparationMinutes, Recipe, RecipeId, RecipeLink, RecipeParts,
///     RecipeTitle, UserId,
/// };
///
/// let recipe = Recipe::from_parts(RecipeParts {
///     id: RecipeId::new(1),
///     owner: UserId::random(),
///     title: RecipeTitle::new("Sample recipe").expect("title"),
///     time_minutes: PreparationMinutes::new(10).expect("minutes"),
///     price: "5".parse().expect("price"),
///     link: RecipeLink::default(),
///     tags: Vec::new(),
///     ingredients: Vec::new(),
/// });
/// let view = summary_view(&recipe);
/// assert_eq!(view.price, "5.00");
/// assert!(view.tags.is_empty());
/// ```
pub fn summary_view(recipe: &Recipe) -> RecipeSummary {
    RecipeSummary {
        id: recipe.id().get(),
        title: recipe.title().as_ref().to_owned(),
        time_minutes: recipe.time_minutes().get(),
        price: recipe.price().to_string(),
        link: recipe.link().as_ref().to_owned(),
        tags: recipe.tags().iter().map(|tag| tag.id().get()).collect(),
        ingredients: recipe
            .ingredients()
            .iter()
            .map(|ingredient| ingredient.id().get())
            .collect(),
    }
}

/// Project a recipe onto its detail view.
pub fn detail_view(recipe: &Recipe) -> RecipeDetail {
    RecipeDetail {
        id: recipe.id().get(),
        title: recipe.title().as_ref().to_owned(),
        time_minutes: recipe.time_minutes().get(),
        price: recipe.price().to_string(),
        link: recipe.link().as_ref().to_owned(),
        tags: recipe.tags().iter().map(AttributeView::from).collect(),
        ingredients: recipe
            .ingredients()
            .iter()
            .map(AttributeView::from)
            .collect(),
    }
}
