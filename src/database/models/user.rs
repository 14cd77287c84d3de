use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Account owning posts and likes. Users are registered by the login
/// service; this API only resolves them by email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub user_idx: i64,
    pub email: String,
    pub nickname: String,
    pub created_at: DateTime<Utc>,
}
