//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    LoginService, RecipeAttributesCommand, RecipeAttributesQuery, RecipeCommand, RecipeQuery,
    UserProfileQuery, UserRegistration,
};

/// Parameter object bundling every port the HTTP handlers call.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn UserRegistration>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub recipes: Arc<dyn RecipeCommand>,
    pub recipes_query: Arc<dyn RecipeQuery>,
    pub attributes: Arc<dyn RecipeAttributesCommand>,
    pub attributes_query: Arc<dyn RecipeAttributesQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn UserRegistration>,
    pub profile: Arc<dyn UserProfileQuery>,
    pub recipes: Arc<dyn RecipeCommand>,
    pub recipes_query: Arc<dyn RecipeQuery>,
    pub attributes: Arc<dyn RecipeAttributesCommand>,
    pub attributes_query: Arc<dyn RecipeAttributesQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use recipe_backend::domain::{
    ///     RecipeAttributesService, RecipeCommandService, RecipeQueryService,
    ///     UserAccountsService,
    /// };
    /// use recipe_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use recipe_backend::outbound::Argon2PasswordHasher;
    /// use recipe_backend::outbound::memory::InMemoryStore;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let accounts = Arc::new(UserAccountsService::new(
    ///     store.clone(),
    ///     Arc::new(Argon2PasswordHasher::new()),
    /// ));
    /// let attributes = Arc::new(RecipeAttributesService::new(store.clone(), store.clone()));
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: accounts.clone(),
    ///     registration: accounts.clone(),
    ///     profile: accounts,
    ///     recipes: Arc::new(RecipeCommandService::new(store.clone())),
    ///     recipes_query: Arc::new(RecipeQueryService::new(store)),
    ///     attributes: attributes.clone(),
    ///     attributes_query: attributes,
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            registration,
            profile,
            recipes,
            recipes_query,
            attributes,
            attributes_query,
        } = ports;
        Self {
            login,
            registration,
            profile,
            recipes,
            recipes_query,
            attributes,
            attributes_query,
        }
    }
}
