//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        /// Normalised login email; unique.
        email -> Varchar,
        name -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    tags (id) {
        id -> Int8,
        user_id -> Uuid,
        name -> Varchar,
    }
}

diesel::table! {
    ingredients (id) {
        id -> Int8,
        user_id -> Uuid,
        name -> Varchar,
    }
}

diesel::table! {
    recipes (id) {
        id -> Int8,
        user_id -> Uuid,
        title -> Varchar,
        time_minutes -> Int4,
        /// NUMERIC(5, 2).
        price -> Numeric,
        link -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Recipe to tag association; composite primary key.
    recipe_tags (recipe_id, tag_id) {
        recipe_id -> Int8,
        tag_id -> Int8,
    }
}

diesel::table! {
    /// Recipe to ingredient association; composite primary key.
    recipe_ingredients (recipe_id, ingredient_id) {
        recipe_id -> Int8,
        ingredient_id -> Int8,
    }
}

diesel::joinable!(tags -> users (user_id));
diesel::joinable!(ingredients -> users (user_id));
diesel::joinable!(recipes -> users (user_id));
diesel::joinable!(recipe_tags -> recipes (recipe_id));
diesel::joinable!(recipe_tags -> tags (tag_id));
diesel::joinable!(recipe_ingredients -> recipes (recipe_id));
diesel::joinable!(recipe_ingredients -> ingredients (ingredient_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    tags,
    ingredients,
    recipes,
    recipe_tags,
    recipe_ingredients,
);
