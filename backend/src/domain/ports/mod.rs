//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`PasswordHasher`]) are implemented by
//! outbound adapters. Driving ports (`*Command`, `*Query`, [`LoginService`],
//! [`UserRegistration`]) are implemented by domain services and called by the
//! HTTP layer.

mod macros;
pub(crate) use macros::define_port_error;

mod ingredient_repository;
mod login_service;
mod password_hasher;
mod recipe_attributes;
mod recipe_command;
mod recipe_query;
mod recipe_repository;
mod tag_repository;
mod user_profile_query;
mod user_registration;
mod user_repository;

#[cfg(test)]
pub use ingredient_repository::MockIngredientRepository;
pub use ingredient_repository::{IngredientRepository, IngredientRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use recipe_attributes::{MockRecipeAttributesCommand, MockRecipeAttributesQuery};
pub use recipe_attributes::{RecipeAttributesCommand, RecipeAttributesQuery};
#[cfg(test)]
pub use recipe_command::MockRecipeCommand;
pub use recipe_command::RecipeCommand;
#[cfg(test)]
pub use recipe_query::MockRecipeQuery;
pub use recipe_query::RecipeQuery;
#[cfg(test)]
pub use recipe_repository::MockRecipeRepository;
pub use recipe_repository::{RecipeRepository, RecipeRepositoryError};
#[cfg(test)]
pub use tag_repository::MockTagRepository;
pub use tag_repository::{TagRepository, TagRepositoryError};
#[cfg(test)]
pub use user_profile_query::MockUserProfileQuery;
pub use user_profile_query::UserProfileQuery;
#[cfg(test)]
pub use user_registration::MockUserRegistration;
pub use user_registration::UserRegistration;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{StoredCredentials, UserRepository, UserRepositoryError};

#[cfg(test)]
mod tests;
