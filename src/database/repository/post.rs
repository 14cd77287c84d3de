use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::database::models::{NewPost, Post};

/// Persistence for posts and the post/user like relation.
///
/// Every list finder returns posts newest first: `created_at` descending,
/// ties broken by `post_idx` descending.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Insert a post and return its new identifier
    async fn save(&self, post: NewPost) -> Result<i64, DatabaseError>;

    async fn find_by_idx(&self, post_idx: i64) -> Result<Option<Post>, DatabaseError>;

    /// Replace title and content and bump `updated_at`. Returns false when
    /// the post no longer exists.
    async fn update(&self, post_idx: i64, title: &str, content: &str) -> Result<bool, DatabaseError>;

    /// Remove the post together with its likes. Returns false when the post
    /// did not exist.
    async fn delete(&self, post_idx: i64) -> Result<bool, DatabaseError>;

    async fn find_all(&self) -> Result<Vec<Post>, DatabaseError>;

    /// Posts whose author is `user_idx`
    async fn find_by_author(&self, user_idx: i64) -> Result<Vec<Post>, DatabaseError>;

    /// Posts liked by `user_idx`
    async fn find_liked_by(&self, user_idx: i64) -> Result<Vec<Post>, DatabaseError>;

    async fn is_liked(&self, post_idx: i64, user_idx: i64) -> Result<bool, DatabaseError>;

    /// Record a like; liking twice is a no-op
    async fn like(&self, post_idx: i64, user_idx: i64) -> Result<(), DatabaseError>;

    /// Drop a like if present
    async fn unlike(&self, post_idx: i64, user_idx: i64) -> Result<(), DatabaseError>;

    async fn count_likes(&self, post_idx: i64) -> Result<i64, DatabaseError>;
}

const SELECT_POST: &str = r#"
    SELECT
        p.post_idx, p.user_idx,
        u.email AS author_email, u.nickname AS author_nickname,
        p.title, p.content,
        (SELECT COUNT(*) FROM post_like l WHERE l.post_idx = p.post_idx) AS like_count,
        p.created_at, p.updated_at
    FROM post p
    JOIN users u ON u.user_idx = p.user_idx
"#;

const NEWEST_FIRST: &str = "ORDER BY p.created_at DESC, p.post_idx DESC";

pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn save(&self, post: NewPost) -> Result<i64, DatabaseError> {
        let (post_idx,): (i64,) = sqlx::query_as(
            "INSERT INTO post (user_idx, title, content) VALUES ($1, $2, $3) RETURNING post_idx",
        )
        .bind(post.user_idx)
        .bind(&post.title)
        .bind(&post.content)
        .fetch_one(&self.pool)
        .await?;
        Ok(post_idx)
    }

    async fn find_by_idx(&self, post_idx: i64) -> Result<Option<Post>, DatabaseError> {
        let sql = format!("{SELECT_POST} WHERE p.post_idx = $1");
        Ok(sqlx::query_as::<_, Post>(&sql)
            .bind(post_idx)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn update(&self, post_idx: i64, title: &str, content: &str) -> Result<bool, DatabaseError> {
        let result = sqlx::query(
            "UPDATE post SET title = $1, content = $2, updated_at = now() WHERE post_idx = $3",
        )
        .bind(title)
        .bind(content)
        .bind(post_idx)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, post_idx: i64) -> Result<bool, DatabaseError> {
        // post_like rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM post WHERE post_idx = $1")
            .bind(post_idx)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_all(&self) -> Result<Vec<Post>, DatabaseError> {
        let sql = format!("{SELECT_POST} {NEWEST_FIRST}");
        Ok(sqlx::query_as::<_, Post>(&sql).fetch_all(&self.pool).await?)
    }

    async fn find_by_author(&self, user_idx: i64) -> Result<Vec<Post>, DatabaseError> {
        let sql = format!("{SELECT_POST} WHERE p.user_idx = $1 {NEWEST_FIRST}");
        Ok(sqlx::query_as::<_, Post>(&sql)
            .bind(user_idx)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn find_liked_by(&self, user_idx: i64) -> Result<Vec<Post>, DatabaseError> {
        let sql = format!(
            "{SELECT_POST} JOIN post_like mine ON mine.post_idx = p.post_idx WHERE mine.user_idx = $1 {NEWEST_FIRST}"
        );
        Ok(sqlx::query_as::<_, Post>(&sql)
            .bind(user_idx)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn is_liked(&self, post_idx: i64, user_idx: i64) -> Result<bool, DatabaseError> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (SELECT 1 FROM post_like WHERE post_idx = $1 AND user_idx = $2)",
        )
        .bind(post_idx)
        .bind(user_idx)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn like(&self, post_idx: i64, user_idx: i64) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO post_like (post_idx, user_idx) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(post_idx)
        .bind(user_idx)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn unlike(&self, post_idx: i64, user_idx: i64) -> Result<(), DatabaseError> {
        sqlx::query("DELETE FROM post_like WHERE post_idx = $1 AND user_idx = $2")
            .bind(post_idx)
            .bind(user_idx)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn count_likes(&self, post_idx: i64) -> Result<i64, DatabaseError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM post_like WHERE post_idx = $1")
            .bind(post_idx)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
