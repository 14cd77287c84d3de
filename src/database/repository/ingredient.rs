use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::Ingredient;

/// Read-only finders over the ingredient catalog.
///
/// Every list finder returns rows ascending by `ingredient_idx`.
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Whole catalog
    async fn find_all(&self) -> Result<Vec<Ingredient>, DatabaseError>;

    /// Exact match on the unique `name`; zero or one row
    async fn find_by_name(&self, name: &str) -> Result<Option<Ingredient>, DatabaseError>;

    /// Exact match on `category`
    async fn find_by_category(&self, category: &str) -> Result<Vec<Ingredient>, DatabaseError>;

    /// Exact match on `score`
    async fn find_by_score(&self, score: i32) -> Result<Vec<Ingredient>, DatabaseError>;

    /// `from <= score <= to`; both bounds included
    async fn find_by_score_between(&self, from: i32, to: i32) -> Result<Vec<Ingredient>, DatabaseError>;
}

const SELECT_INGREDIENT: &str = "SELECT ingredient_idx, name, category, score FROM ingredient";

pub struct PgIngredientRepository {
    pool: PgPool,
}

impl PgIngredientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IngredientRepository for PgIngredientRepository {
    async fn find_all(&self) -> Result<Vec<Ingredient>, DatabaseError> {
        let sql = format!("{SELECT_INGREDIENT} ORDER BY ingredient_idx");
        Ok(sqlx::query_as::<_, Ingredient>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Ingredient>, DatabaseError> {
        let sql = format!("{SELECT_INGREDIENT} WHERE name = $1");
        Ok(sqlx::query_as::<_, Ingredient>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Ingredient>, DatabaseError> {
        let sql = format!("{SELECT_INGREDIENT} WHERE category = $1 ORDER BY ingredient_idx");
        Ok(sqlx::query_as::<_, Ingredient>(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_by_score(&self, score: i32) -> Result<Vec<Ingredient>, DatabaseError> {
        let sql = format!("{SELECT_INGREDIENT} WHERE score = $1 ORDER BY ingredient_idx");
        Ok(sqlx::query_as::<_, Ingredient>(&sql)
            .bind(score)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_by_score_between(&self, from: i32, to: i32) -> Result<Vec<Ingredient>, DatabaseError> {
        // BETWEEN is inclusive on both ends
        let sql = format!("{SELECT_INGREDIENT} WHERE score BETWEEN $1 AND $2 ORDER BY ingredient_idx");
        Ok(sqlx::query_as::<_, Ingredient>(&sql)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?)
    }
}
