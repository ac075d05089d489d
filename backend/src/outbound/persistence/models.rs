//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::schema::{ingredients, recipe_ingredients, recipe_tags, recipes, tags, users};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    #[expect(dead_code, reason = "audit column kept for operators")]
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
}

// ---------------------------------------------------------------------------
// Tags and ingredients
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct TagRow {
    pub id: i64,
    pub user_id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tags)]
pub(crate) struct NewTagRow<'a> {
    pub user_id: Uuid,
    pub name: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = ingredients)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IngredientRow {
    pub id: i64,
    pub user_id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = ingredients)]
pub(crate) struct NewIngredientRow<'a> {
    pub user_id: Uuid,
    pub name: &'a str,
}

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

/// Row struct for reading from the recipes table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = recipes)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecipeRow {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub link: String,
}

/// Insertable struct for creating new recipe records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = recipes)]
pub(crate) struct NewRecipeRow<'a> {
    pub user_id: Uuid,
    pub title: &'a str,
    pub time_minutes: i32,
    pub price: Decimal,
    pub link: &'a str,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = recipe_tags)]
pub(crate) struct RecipeTagRow {
    pub recipe_id: i64,
    pub tag_id: i64,
}

#[derive(Debug, Clone, Copy, Insertable)]
#[diesel(table_name = recipe_ingredients)]
pub(crate) struct RecipeIngredientRow {
    pub recipe_id: i64,
    pub ingredient_id: i64,
}
