//! Builders wiring repositories into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use recipe_backend::domain::ports::{
    IngredientRepository, RecipeRepository, TagRepository, UserRepository,
};
use recipe_backend::domain::{
    RecipeAttributesService, RecipeCommandService, RecipeQueryService, UserAccountsService,
};
use recipe_backend::inbound::http::state::{HttpState, HttpStatePorts};
use recipe_backend::outbound::Argon2PasswordHasher;
use recipe_backend::outbound::memory::InMemoryStore;
use recipe_backend::outbound::persistence::{
    DbPool, DieselIngredientRepository, DieselRecipeRepository, DieselTagRepository,
    DieselUserRepository,
};

use super::ServerConfig;

/// Driven adapters backing the services.
struct Repositories<U, T, I, R> {
    users: Arc<U>,
    tags: Arc<T>,
    ingredients: Arc<I>,
    recipes: Arc<R>,
}

impl<U, T, I, R> Repositories<U, T, I, R>
where
    U: UserRepository + 'static,
    T: TagRepository + 'static,
    I: IngredientRepository + 'static,
    R: RecipeRepository + 'static,
{
    fn into_ports(self) -> HttpStatePorts {
        let accounts = Arc::new(UserAccountsService::new(
            self.users,
            Arc::new(Argon2PasswordHasher::new()),
        ));
        let attributes = Arc::new(RecipeAttributesService::new(self.tags, self.ingredients));
        HttpStatePorts {
            login: accounts.clone(),
            registration: accounts.clone(),
            profile: accounts,
            recipes: Arc::new(RecipeCommandService::new(self.recipes.clone())),
            recipes_query: Arc::new(RecipeQueryService::new(self.recipes)),
            attributes: attributes.clone(),
            attributes_query: attributes,
        }
    }
}

fn diesel_repositories(
    pool: &DbPool,
) -> Repositories<
    DieselUserRepository,
    DieselTagRepository,
    DieselIngredientRepository,
    DieselRecipeRepository,
> {
    Repositories {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        tags: Arc::new(DieselTagRepository::new(pool.clone())),
        ingredients: Arc::new(DieselIngredientRepository::new(pool.clone())),
        recipes: Arc::new(DieselRecipeRepository::new(pool.clone())),
    }
}

fn memory_repositories() -> Repositories<InMemoryStore, InMemoryStore, InMemoryStore, InMemoryStore>
{
    let store = Arc::new(InMemoryStore::new());
    Repositories {
        users: store.clone(),
        tags: store.clone(),
        ingredients: store.clone(),
        recipes: store,
    }
}

/// Build HTTP state from the configured store.
///
/// Uses the Diesel adapters when a pool is configured, otherwise a single
/// in-memory store shared by every repository port.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL persistence");
            diesel_repositories(pool).into_ports()
        }
        None => {
            info!("no database configured; using in-memory persistence");
            memory_repositories().into_ports()
        }
    };
    web::Data::new(HttpState::new(ports))
}
