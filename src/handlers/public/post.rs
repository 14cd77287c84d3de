use axum::extract::State;

use crate::api::dto::PostResponseDto;
use crate::api::ResponseTemplate;
use crate::state::AppState;

/// GET /posts - every post, newest first
pub async fn get_posts(State(state): State<AppState>) -> ResponseTemplate<Vec<PostResponseDto>> {
    state.posts.get_posts().await.into()
}
