use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::dto::{PostDraft, PostIdxResponseDto, PostResponseDto};
use crate::api::status::ResponseTemplateStatus;
use crate::database::models::{NewPost, Post, User};
use crate::database::repository::{PostRepository, UserRepository};
use crate::error::ServiceResult;

/// Community board rules: existence checks, ownership checks and DTO assembly.
///
/// Every operation takes the caller's email explicitly; the transport layer
/// is responsible for deriving it from a validated token.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    async fn resolve_user(&self, email: &str) -> ServiceResult<User> {
        match self.users.find_by_email(email).await? {
            Some(user) => Ok(user),
            None => {
                warn!("No user record for {}", email);
                Err(ResponseTemplateStatus::UserNotFound.into())
            }
        }
    }

    async fn load_post(&self, post_idx: i64) -> ServiceResult<Post> {
        match self.posts.find_by_idx(post_idx).await? {
            Some(post) => Ok(post),
            None => {
                debug!("Post {} not found", post_idx);
                Err(ResponseTemplateStatus::PostNotFound.into())
            }
        }
    }

    /// Load a post the caller is allowed to modify
    async fn load_own_post(&self, caller_email: &str, post_idx: i64) -> ServiceResult<(Post, User)> {
        let post = self.load_post(post_idx).await?;
        let user = self.resolve_user(caller_email).await?;
        if !post.is_written_by(&user.email) {
            warn!(
                "User {} is not the author of post {} (author {})",
                user.email, post_idx, post.author_email
            );
            return Err(ResponseTemplateStatus::NotAuthor.into());
        }
        Ok((post, user))
    }

    /// Create a post owned by the caller and return its identifier
    pub async fn save(&self, caller_email: &str, draft: PostDraft) -> ServiceResult<i64> {
        let user = self.resolve_user(caller_email).await?;
        let (title, content) = draft.into_parts();
        let post_idx = self
            .posts
            .save(NewPost { user_idx: user.user_idx, title, content })
            .await?;
        debug!("User {} created post {}", user.email, post_idx);
        Ok(post_idx)
    }

    /// Replace title and content; only the author may do this
    pub async fn update(&self, post_idx: i64, caller_email: &str, draft: PostDraft) -> ServiceResult<()> {
        self.load_own_post(caller_email, post_idx).await?;
        // The post can vanish between the check and the write
        if !self.posts.update(post_idx, draft.title(), draft.content()).await? {
            return Err(ResponseTemplateStatus::PostNotFound.into());
        }
        debug!("User {} updated post {}", caller_email, post_idx);
        Ok(())
    }

    /// Detail view; readable by any resolved user
    pub async fn find_by_post_idx(&self, caller_email: &str, post_idx: i64) -> ServiceResult<PostIdxResponseDto> {
        let post = self.load_post(post_idx).await?;
        let user = self.resolve_user(caller_email).await?;
        let is_liked = self.posts.is_liked(post_idx, user.user_idx).await?;
        Ok(PostIdxResponseDto::new(post, &user.email, is_liked))
    }

    /// Remove a post permanently; only the author may do this
    pub async fn delete(&self, caller_email: &str, post_idx: i64) -> ServiceResult<()> {
        self.load_own_post(caller_email, post_idx).await?;
        if !self.posts.delete(post_idx).await? {
            return Err(ResponseTemplateStatus::PostNotFound.into());
        }
        debug!("User {} deleted post {}", caller_email, post_idx);
        Ok(())
    }

    /// All posts, newest first
    pub async fn get_posts(&self) -> ServiceResult<Vec<PostResponseDto>> {
        let posts = self.posts.find_all().await?;
        Ok(posts.into_iter().map(PostResponseDto::from).collect())
    }

    pub async fn find_my_post(&self, caller_email: &str) -> ServiceResult<Vec<PostResponseDto>> {
        let user = self.resolve_user(caller_email).await?;
        let posts = self.posts.find_by_author(user.user_idx).await?;
        Ok(posts.into_iter().map(PostResponseDto::from).collect())
    }

    pub async fn find_my_likes(&self, caller_email: &str) -> ServiceResult<Vec<PostResponseDto>> {
        let user = self.resolve_user(caller_email).await?;
        let posts = self.posts.find_liked_by(user.user_idx).await?;
        Ok(posts.into_iter().map(PostResponseDto::from).collect())
    }

    /// Like a post; returns the resulting like count
    pub async fn like(&self, caller_email: &str, post_idx: i64) -> ServiceResult<i64> {
        self.load_post(post_idx).await?;
        let user = self.resolve_user(caller_email).await?;
        self.posts.like(post_idx, user.user_idx).await?;
        Ok(self.posts.count_likes(post_idx).await?)
    }

    /// Withdraw a like; returns the resulting like count
    pub async fn unlike(&self, caller_email: &str, post_idx: i64) -> ServiceResult<i64> {
        self.load_post(post_idx).await?;
        let user = self.resolve_user(caller_email).await?;
        self.posts.unlike(post_idx, user.user_idx).await?;
        Ok(self.posts.count_likes(post_idx).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::{PostSaveRequestDto, PostUpdateRequestDto};
    use crate::database::MemoryStore;

    const U1: &str = "u1@mummoom.com";
    const U2: &str = "u2@mummoom.com";

    async fn setup() -> (Arc<MemoryStore>, PostService) {
        let store = Arc::new(MemoryStore::new());
        store.add_user(U1, "first").await;
        store.add_user(U2, "second").await;
        let service = PostService::new(store.clone(), store.clone());
        (store, service)
    }

    fn draft(title: &str, content: &str) -> PostDraft {
        PostDraft::try_from(PostSaveRequestDto {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
        })
        .unwrap()
    }

    fn status<T: std::fmt::Debug>(result: ServiceResult<T>) -> ResponseTemplateStatus {
        result.unwrap_err().status()
    }

    #[tokio::test]
    async fn save_then_find_returns_input() {
        let (_, service) = setup().await;
        let idx = service.save(U1, draft("A", "B")).await.unwrap();
        let dto = service.find_by_post_idx(U2, idx).await.unwrap();
        assert_eq!(dto.title, "A");
        assert_eq!(dto.content, "B");
        assert_eq!(dto.writer_email, U1);
        assert!(!dto.is_writer);
        assert!(!dto.is_liked);
    }

    #[tokio::test]
    async fn save_requires_known_user() {
        let (store, service) = setup().await;
        let result = service.save("ghost@mummoom.com", draft("A", "B")).await;
        assert_eq!(status(result), ResponseTemplateStatus::UserNotFound);
        assert!(PostRepository::find_all(store.as_ref()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_is_idempotent() {
        let (_, service) = setup().await;
        let idx = service.save(U1, draft("A", "B")).await.unwrap();
        let first = service.find_by_post_idx(U1, idx).await.unwrap();
        let second = service.find_by_post_idx(U1, idx).await.unwrap();
        assert_eq!(first, second);
        assert!(first.is_writer);
    }

    #[tokio::test]
    async fn update_by_non_author_changes_nothing() {
        let (_, service) = setup().await;
        let idx = service.save(U1, draft("A", "B")).await.unwrap();

        let result = service.update(idx, U2, draft("hijack", "hijack")).await;
        assert_eq!(status(result), ResponseTemplateStatus::NotAuthor);

        let dto = service.find_by_post_idx(U1, idx).await.unwrap();
        assert_eq!((dto.title.as_str(), dto.content.as_str()), ("A", "B"));
    }

    #[tokio::test]
    async fn author_updates_both_fields() {
        let (_, service) = setup().await;
        let idx = service.save(U1, draft("A", "B")).await.unwrap();
        let dto = PostUpdateRequestDto { title: Some("C".into()), content: Some("D".into()) };
        service
            .update(idx, U1, PostDraft::try_from(dto).unwrap())
            .await
            .unwrap();
        let detail = service.find_by_post_idx(U1, idx).await.unwrap();
        assert_eq!((detail.title.as_str(), detail.content.as_str()), ("C", "D"));
        assert!(detail.updated_at >= detail.created_at);
    }

    #[tokio::test]
    async fn delete_by_non_author_keeps_post() {
        let (_, service) = setup().await;
        let idx = service.save(U1, draft("A", "B")).await.unwrap();
        assert_eq!(status(service.delete(U2, idx).await), ResponseTemplateStatus::NotAuthor);
        assert!(service.find_by_post_idx(U2, idx).await.is_ok());
    }

    #[tokio::test]
    async fn missing_post_is_reported_everywhere() {
        let (_, service) = setup().await;
        assert_eq!(status(service.find_by_post_idx(U1, 99).await), ResponseTemplateStatus::PostNotFound);
        assert_eq!(status(service.update(99, U1, draft("A", "B")).await), ResponseTemplateStatus::PostNotFound);
        assert_eq!(status(service.delete(U1, 99).await), ResponseTemplateStatus::PostNotFound);
        assert_eq!(status(service.like(U1, 99).await), ResponseTemplateStatus::PostNotFound);
    }

    #[tokio::test]
    async fn post_lookup_precedes_user_lookup() {
        let (_, service) = setup().await;
        let result = service.update(99, "ghost@mummoom.com", draft("A", "B")).await;
        assert_eq!(status(result), ResponseTemplateStatus::PostNotFound);
    }

    #[tokio::test]
    async fn ownership_scenario() {
        let (_, service) = setup().await;
        let idx = service.save(U1, draft("A", "B")).await.unwrap();
        assert_eq!(idx, 1);
        assert_eq!(status(service.update(1, U2, draft("X", "Y")).await), ResponseTemplateStatus::NotAuthor);
        service.delete(U1, 1).await.unwrap();
        assert_eq!(status(service.find_by_post_idx(U2, 1).await), ResponseTemplateStatus::PostNotFound);
    }

    #[tokio::test]
    async fn listings_are_newest_first_and_scoped() {
        let (_, service) = setup().await;
        let a = service.save(U1, draft("first", "x")).await.unwrap();
        let b = service.save(U2, draft("second", "x")).await.unwrap();
        let c = service.save(U1, draft("third", "x")).await.unwrap();

        let all: Vec<i64> = service.get_posts().await.unwrap().iter().map(|p| p.post_idx).collect();
        assert_eq!(all, vec![c, b, a]);

        let mine: Vec<i64> = service.find_my_post(U1).await.unwrap().iter().map(|p| p.post_idx).collect();
        assert_eq!(mine, vec![c, a]);
    }

    #[tokio::test]
    async fn likes_are_idempotent_and_listed() {
        let (_, service) = setup().await;
        let idx = service.save(U1, draft("A", "B")).await.unwrap();

        assert_eq!(service.like(U2, idx).await.unwrap(), 1);
        assert_eq!(service.like(U2, idx).await.unwrap(), 1);
        assert_eq!(service.like(U1, idx).await.unwrap(), 2);

        let liked = service.find_my_likes(U2).await.unwrap();
        assert_eq!(liked.len(), 1);
        assert_eq!(liked[0].like_count, 2);
        assert!(service.find_by_post_idx(U2, idx).await.unwrap().is_liked);

        assert_eq!(service.unlike(U2, idx).await.unwrap(), 1);
        assert!(service.find_my_likes(U2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_caller_cannot_list_own_posts() {
        let (_, service) = setup().await;
        assert_eq!(
            status(service.find_my_post("ghost@mummoom.com").await),
            ResponseTemplateStatus::UserNotFound
        );
        assert_eq!(
            status(service.find_my_likes("ghost@mummoom.com").await),
            ResponseTemplateStatus::UserNotFound
        );
    }

    #[tokio::test]
    async fn store_failure_becomes_db_error() {
        let (store, service) = setup().await;
        store.set_unavailable(true);
        assert_eq!(status(service.get_posts().await), ResponseTemplateStatus::DbError);
        assert_eq!(status(service.save(U1, draft("A", "B")).await), ResponseTemplateStatus::DbError);
    }
}
