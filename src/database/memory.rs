use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::database::manager::DatabaseError;
use crate::database::models::{Ingredient, NewPost, Post, User};
use crate::database::repository::{IngredientRepository, PostRepository, UserRepository};

#[derive(Debug, Clone)]
struct PostRow {
    post_idx: i64,
    user_idx: i64,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct MemoryState {
    users: BTreeMap<i64, User>,
    posts: BTreeMap<i64, PostRow>,
    /// (post_idx, user_idx)
    likes: BTreeSet<(i64, i64)>,
    ingredients: BTreeMap<i64, Ingredient>,
    last_user_idx: i64,
    last_post_idx: i64,
    last_ingredient_idx: i64,
}

impl MemoryState {
    fn like_count(&self, post_idx: i64) -> i64 {
        self.likes.iter().filter(|(p, _)| *p == post_idx).count() as i64
    }

    fn assemble(&self, row: &PostRow) -> Option<Post> {
        let author = self.users.get(&row.user_idx)?;
        Some(Post {
            post_idx: row.post_idx,
            user_idx: row.user_idx,
            author_email: author.email.clone(),
            author_nickname: author.nickname.clone(),
            title: row.title.clone(),
            content: row.content.clone(),
            like_count: self.like_count(row.post_idx),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    fn newest_first<'a>(&self, rows: impl Iterator<Item = &'a PostRow>) -> Vec<Post> {
        let mut posts: Vec<Post> = rows.filter_map(|r| self.assemble(r)).collect();
        posts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then(b.post_idx.cmp(&a.post_idx))
        });
        posts
    }
}

/// In-process store implementing every repository trait.
///
/// Backs the test suites and `STORE_BACKEND=memory`. Identifiers start at 1
/// and are never reused, as with a `BIGSERIAL` column.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail as if the database were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DatabaseError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryError("memory store marked unavailable".to_string()));
        }
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        self.check_available()
    }

    /// Register a user; returns the existing record if the email is taken
    pub async fn add_user(&self, email: &str, nickname: &str) -> User {
        let mut state = self.state.write().await;
        if let Some(existing) = state.users.values().find(|u| u.email == email) {
            return existing.clone();
        }
        state.last_user_idx += 1;
        let user = User {
            user_idx: state.last_user_idx,
            email: email.to_string(),
            nickname: nickname.to_string(),
            created_at: Utc::now(),
        };
        state.users.insert(user.user_idx, user.clone());
        user
    }

    /// Add a catalog entry, enforcing the unique name
    pub async fn add_ingredient(
        &self,
        name: &str,
        category: &str,
        score: i32,
    ) -> Result<Ingredient, DatabaseError> {
        let mut state = self.state.write().await;
        if state.ingredients.values().any(|i| i.name == name) {
            return Err(DatabaseError::QueryError(format!(
                "duplicate ingredient name: {}",
                name
            )));
        }
        state.last_ingredient_idx += 1;
        let ingredient = Ingredient {
            ingredient_idx: state.last_ingredient_idx,
            name: name.to_string(),
            category: category.to_string(),
            score,
        };
        state.ingredients.insert(ingredient.ingredient_idx, ingredient.clone());
        Ok(ingredient)
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state.users.values().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl PostRepository for MemoryStore {
    async fn save(&self, post: NewPost) -> Result<i64, DatabaseError> {
        self.check_available()?;
        let mut state = self.state.write().await;
        if !state.users.contains_key(&post.user_idx) {
            return Err(DatabaseError::QueryError(format!(
                "post author {} does not exist",
                post.user_idx
            )));
        }
        state.last_post_idx += 1;
        let now = Utc::now();
        let row = PostRow {
            post_idx: state.last_post_idx,
            user_idx: post.user_idx,
            title: post.title,
            content: post.content,
            created_at: now,
            updated_at: now,
        };
        let post_idx = row.post_idx;
        state.posts.insert(post_idx, row);
        Ok(post_idx)
    }

    async fn find_by_idx(&self, post_idx: i64) -> Result<Option<Post>, DatabaseError> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state.posts.get(&post_idx).and_then(|row| state.assemble(row)))
    }

    async fn update(&self, post_idx: i64, title: &str, content: &str) -> Result<bool, DatabaseError> {
        self.check_available()?;
        let mut state = self.state.write().await;
        match state.posts.get_mut(&post_idx) {
            Some(row) => {
                row.title = title.to_string();
                row.content = content.to_string();
                row.updated_at = Utc::now();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, post_idx: i64) -> Result<bool, DatabaseError> {
        self.check_available()?;
        let mut state = self.state.write().await;
        let removed = state.posts.remove(&post_idx).is_some();
        state.likes.retain(|(p, _)| *p != post_idx);
        Ok(removed)
    }

    async fn find_all(&self) -> Result<Vec<Post>, DatabaseError> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state.newest_first(state.posts.values()))
    }

    async fn find_by_author(&self, user_idx: i64) -> Result<Vec<Post>, DatabaseError> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state.newest_first(state.posts.values().filter(|r| r.user_idx == user_idx)))
    }

    async fn find_liked_by(&self, user_idx: i64) -> Result<Vec<Post>, DatabaseError> {
        self.check_available()?;
        let state = self.state.read().await;
        let liked = state
            .posts
            .values()
            .filter(|r| state.likes.contains(&(r.post_idx, user_idx)));
        Ok(state.newest_first(liked))
    }

    async fn is_liked(&self, post_idx: i64, user_idx: i64) -> Result<bool, DatabaseError> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state.likes.contains(&(post_idx, user_idx)))
    }

    async fn like(&self, post_idx: i64, user_idx: i64) -> Result<(), DatabaseError> {
        self.check_available()?;
        let mut state = self.state.write().await;
        if !state.posts.contains_key(&post_idx) || !state.users.contains_key(&user_idx) {
            return Err(DatabaseError::QueryError(
                "post_like references a missing post or user".to_string(),
            ));
        }
        state.likes.insert((post_idx, user_idx));
        Ok(())
    }

    async fn unlike(&self, post_idx: i64, user_idx: i64) -> Result<(), DatabaseError> {
        self.check_available()?;
        let mut state = self.state.write().await;
        state.likes.remove(&(post_idx, user_idx));
        Ok(())
    }

    async fn count_likes(&self, post_idx: i64) -> Result<i64, DatabaseError> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state.like_count(post_idx))
    }
}

#[async_trait]
impl IngredientRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<Ingredient>, DatabaseError> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state.ingredients.values().cloned().collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Ingredient>, DatabaseError> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state.ingredients.values().find(|i| i.name == name).cloned())
    }

    async fn find_by_category(&self, category: &str) -> Result<Vec<Ingredient>, DatabaseError> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state
            .ingredients
            .values()
            .filter(|i| i.category == category)
            .cloned()
            .collect())
    }

    async fn find_by_score(&self, score: i32) -> Result<Vec<Ingredient>, DatabaseError> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state
            .ingredients
            .values()
            .filter(|i| i.score == score)
            .cloned()
            .collect())
    }

    async fn find_by_score_between(&self, from: i32, to: i32) -> Result<Vec<Ingredient>, DatabaseError> {
        self.check_available()?;
        let state = self.state.read().await;
        Ok(state
            .ingredients
            .values()
            .filter(|i| (from..=to).contains(&i.score))
            .cloned()
            .collect())
    }
}
