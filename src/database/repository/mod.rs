//! Query interfaces over the relational store.
//!
//! Each trait documents the filter and ordering of its finders. The Postgres
//! implementations live next to their trait; `MemoryStore` implements all of
//! them for tests and database-less development.

pub mod ingredient;
pub mod post;
pub mod user;

pub use ingredient::{IngredientRepository, PgIngredientRepository};
pub use post::{PgPostRepository, PostRepository};
pub use user::{PgUserRepository, UserRepository};
