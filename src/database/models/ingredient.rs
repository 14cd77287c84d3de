use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Ingredient {
    pub ingredient_idx: i64,
    /// Unique across the catalog
    pub name: String,
    pub category: String,
    pub score: i32,
}
