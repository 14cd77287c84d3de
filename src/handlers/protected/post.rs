// handlers/protected/post.rs - authenticated community board endpoints
//
// Each handler reads the caller from the JWT extension, does the presence
// checks on its input, calls PostService and wraps the outcome in one
// ResponseTemplate. Failures keep transport status 200.

use axum::extract::{
    rejection::{JsonRejection, PathRejection},
    Extension, Json, Path, State,
};

use crate::api::dto::{
    PostDraft, PostIdxResponseDto, PostResponseDto, PostSaveRequestDto, PostUpdateRequestDto,
};
use crate::api::ResponseTemplate;
use crate::handlers::utils::{read_body, read_idx};
use crate::middleware::AuthUser;
use crate::state::AppState;

pub const UPDATE_SUCCESS_MESSAGE: &str = "The post was updated.";
pub const DELETE_SUCCESS_MESSAGE: &str = "The post was deleted.";

/// POST /post - create a post; data is the new postIdx
pub async fn save(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    body: Result<Json<PostSaveRequestDto>, JsonRejection>,
) -> ResponseTemplate<i64> {
    let draft = match read_body(body).and_then(PostDraft::try_from) {
        Ok(draft) => draft,
        Err(e) => return e.into(),
    };
    state.posts.save(&auth.email, draft).await.into()
}

/// PATCH /post/:postIdx - replace title and content (author only)
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<i64>, PathRejection>,
    body: Result<Json<PostUpdateRequestDto>, JsonRejection>,
) -> ResponseTemplate<String> {
    let post_idx = match read_idx(path) {
        Ok(idx) => idx,
        Err(e) => return e.into(),
    };
    let draft = match read_body(body).and_then(PostDraft::try_from) {
        Ok(draft) => draft,
        Err(e) => return e.into(),
    };
    state
        .posts
        .update(post_idx, &auth.email, draft)
        .await
        .map(|()| UPDATE_SUCCESS_MESSAGE.to_string())
        .into()
}

/// GET /post/:postIdx - post detail
pub async fn find_by_post_idx(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<i64>, PathRejection>,
) -> ResponseTemplate<PostIdxResponseDto> {
    let post_idx = match read_idx(path) {
        Ok(idx) => idx,
        Err(e) => return e.into(),
    };
    state.posts.find_by_post_idx(&auth.email, post_idx).await.into()
}

/// DELETE /post/:postIdx - remove a post (author only)
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<i64>, PathRejection>,
) -> ResponseTemplate<String> {
    let post_idx = match read_idx(path) {
        Ok(idx) => idx,
        Err(e) => return e.into(),
    };
    state
        .posts
        .delete(&auth.email, post_idx)
        .await
        .map(|()| DELETE_SUCCESS_MESSAGE.to_string())
        .into()
}

/// GET /post/findMyPosts
pub async fn find_my_posts(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ResponseTemplate<Vec<PostResponseDto>> {
    state.posts.find_my_post(&auth.email).await.into()
}

/// GET /post/findMyLikes
pub async fn find_my_likes(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
) -> ResponseTemplate<Vec<PostResponseDto>> {
    state.posts.find_my_likes(&auth.email).await.into()
}

/// POST /post/:postIdx/like - data is the resulting like count
pub async fn like(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<i64>, PathRejection>,
) -> ResponseTemplate<i64> {
    let post_idx = match read_idx(path) {
        Ok(idx) => idx,
        Err(e) => return e.into(),
    };
    state.posts.like(&auth.email, post_idx).await.into()
}

/// DELETE /post/:postIdx/like - data is the resulting like count
pub async fn unlike(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    path: Result<Path<i64>, PathRejection>,
) -> ResponseTemplate<i64> {
    let post_idx = match read_idx(path) {
        Ok(idx) => idx,
        Err(e) => return e.into(),
    };
    state.posts.unlike(&auth.email, post_idx).await.into()
}
