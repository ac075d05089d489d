//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel rows and domain
//! types. Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module. Connections come from a `bb8` pool of
//! `diesel-async` connections.
//!
//! # Example
//!
//! ```no_run
//! use recipe_backend::outbound::persistence::{DbPool, DieselRecipeRepository, PoolConfig};
//!
//! # async fn build() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/recipes")).await?;
//! let recipes = DieselRecipeRepository::new(pool);
//! # let _ = recipes;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_ingredient_repository;
mod diesel_recipe_repository;
mod diesel_tag_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_ingredient_repository::DieselIngredientRepository;
pub use diesel_recipe_repository::DieselRecipeRepository;
pub use diesel_tag_repository::DieselTagRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
