use std::sync::Arc;

use crate::auth::JwtKeys;
use crate::database::{Repositories, Store};
use crate::services::{IngredientService, PostService};

/// Shared handles given to every handler through `State`
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub ingredients: Arc<IngredientService>,
    pub jwt: JwtKeys,
    pub store: Store,
}

impl AppState {
    pub fn new(repos: Repositories, jwt: JwtKeys) -> Self {
        Self {
            posts: Arc::new(PostService::new(repos.posts, repos.users)),
            ingredients: Arc::new(IngredientService::new(repos.ingredients)),
            jwt,
            store: repos.store,
        }
    }
}
