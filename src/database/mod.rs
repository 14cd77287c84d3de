pub mod manager;
pub mod memory;
pub mod models;
pub mod repository;

use std::sync::Arc;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::MemoryStore;
use repository::{
    IngredientRepository, PgIngredientRepository, PgPostRepository, PgUserRepository,
    PostRepository, UserRepository,
};

/// The backing store the repositories were built from
#[derive(Clone)]
pub enum Store {
    Postgres(DatabaseManager),
    Memory(Arc<MemoryStore>),
}

impl Store {
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        match self {
            Store::Postgres(db) => db.health_check().await,
            Store::Memory(store) => store.health_check().await,
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self {
            Store::Postgres(_) => "postgres",
            Store::Memory(_) => "memory",
        }
    }
}

/// One handle per repository trait, all backed by the same store
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub ingredients: Arc<dyn IngredientRepository>,
    pub store: Store,
}

impl Repositories {
    pub fn postgres(db: DatabaseManager) -> Self {
        let pool = db.pool().clone();
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            posts: Arc::new(PgPostRepository::new(pool.clone())),
            ingredients: Arc::new(PgIngredientRepository::new(pool)),
            store: Store::Postgres(db),
        }
    }

    pub fn memory(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            posts: store.clone(),
            ingredients: store.clone(),
            store: Store::Memory(store),
        }
    }
}
