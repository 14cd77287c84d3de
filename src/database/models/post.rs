use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A community board post, joined with its author and like count.
///
/// `author_email`, `author_nickname` and `like_count` are not columns of the
/// `post` table; every post query selects them alongside the row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub post_idx: i64,
    pub user_idx: i64,
    pub author_email: String,
    pub author_nickname: String,
    pub title: String,
    pub content: String,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_written_by(&self, email: &str) -> bool {
        self.author_email == email
    }
}

/// Insert payload for a new post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_idx: i64,
    pub title: String,
    pub content: String,
}
