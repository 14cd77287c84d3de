use std::sync::Arc;

use tracing::debug;

use crate::api::dto::{IngredientDto, IngredientQuery};
use crate::api::status::ResponseTemplateStatus;
use crate::database::models::Ingredient;
use crate::database::repository::IngredientRepository;
use crate::error::ServiceResult;

/// Read-only access to the ingredient catalog
pub struct IngredientService {
    ingredients: Arc<dyn IngredientRepository>,
}

fn to_dtos(rows: Vec<Ingredient>) -> Vec<IngredientDto> {
    rows.into_iter().map(IngredientDto::from).collect()
}

impl IngredientService {
    pub fn new(ingredients: Arc<dyn IngredientRepository>) -> Self {
        Self { ingredients }
    }

    pub async fn find_by_name(&self, name: &str) -> ServiceResult<IngredientDto> {
        self.ingredients
            .find_by_name(name)
            .await?
            .map(IngredientDto::from)
            .ok_or_else(|| ResponseTemplateStatus::IngredientNotFound.into())
    }

    pub async fn find_by_category(&self, category: &str) -> ServiceResult<Vec<IngredientDto>> {
        Ok(to_dtos(self.ingredients.find_by_category(category).await?))
    }

    pub async fn find_by_score(&self, score: i32) -> ServiceResult<Vec<IngredientDto>> {
        Ok(to_dtos(self.ingredients.find_by_score(score).await?))
    }

    /// Closed range: ingredients scoring exactly `from` or `to` are included
    pub async fn find_by_score_between(&self, from: i32, to: i32) -> ServiceResult<Vec<IngredientDto>> {
        if from > to {
            return Err(ResponseTemplateStatus::InvalidScoreRange.into());
        }
        Ok(to_dtos(self.ingredients.find_by_score_between(from, to).await?))
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<IngredientDto>> {
        Ok(to_dtos(self.ingredients.find_all().await?))
    }

    /// Dispatch a listing query. Filters are tried in order: category, exact
    /// score, then range. A lone `from` or `to` leaves the other end open.
    pub async fn search(&self, query: IngredientQuery) -> ServiceResult<Vec<IngredientDto>> {
        debug!("Ingredient search: {:?}", query);
        if let Some(category) = query.category.as_deref() {
            return self.find_by_category(category).await;
        }
        if let Some(score) = query.score {
            return self.find_by_score(score).await;
        }
        match (query.from, query.to) {
            (None, None) => self.find_all().await,
            (from, to) => {
                self.find_by_score_between(from.unwrap_or(i32::MIN), to.unwrap_or(i32::MAX))
                    .await
            }
        }
    }
}
