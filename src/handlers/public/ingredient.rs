use axum::extract::{
    rejection::{PathRejection, QueryRejection},
    Path, Query, State,
};

use crate::api::dto::{IngredientDto, IngredientQuery};
use crate::api::{ResponseTemplate, ResponseTemplateStatus};
use crate::handlers::utils::read_query;
use crate::state::AppState;

/// GET /ingredient/:name - exact lookup by unique name
pub async fn find_by_name(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ResponseTemplate<IngredientDto> {
    let name = match path {
        Ok(Path(name)) => name,
        Err(rejection) => {
            tracing::debug!("Rejected ingredient name: {}", rejection);
            return ResponseTemplateStatus::InvalidPathParameter.into();
        }
    };
    state.ingredients.find_by_name(&name).await.into()
}

/// GET /ingredients?category=..|score=..|from=..&to=..
pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<IngredientQuery>, QueryRejection>,
) -> ResponseTemplate<Vec<IngredientDto>> {
    let query = match read_query(query) {
        Ok(query) => query,
        Err(e) => return e.into(),
    };
    state.ingredients.search(query).await.into()
}
