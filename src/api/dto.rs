use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::status::ResponseTemplateStatus;
use crate::database::models::{Ingredient, Post};
use crate::error::ResponseError;

/// Body of `POST /post`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostSaveRequestDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Body of `PATCH /post/{postIdx}`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostUpdateRequestDto {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Title and content that passed the presence checks.
///
/// Only constructible from a request DTO, so the service never sees an
/// empty title or content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    title: String,
    content: String,
}

impl PostDraft {
    fn from_fields(title: Option<String>, content: Option<String>) -> Result<Self, ResponseError> {
        let title = match title {
            Some(t) if !t.trim().is_empty() => t,
            _ => return Err(ResponseTemplateStatus::EmptyTitle.into()),
        };
        let content = match content {
            Some(c) if !c.trim().is_empty() => c,
            _ => return Err(ResponseTemplateStatus::EmptyContent.into()),
        };
        Ok(Self { title, content })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn into_parts(self) -> (String, String) {
        (self.title, self.content)
    }
}

impl TryFrom<PostSaveRequestDto> for PostDraft {
    type Error = ResponseError;

    fn try_from(dto: PostSaveRequestDto) -> Result<Self, Self::Error> {
        Self::from_fields(dto.title, dto.content)
    }
}

impl TryFrom<PostUpdateRequestDto> for PostDraft {
    type Error = ResponseError;

    fn try_from(dto: PostUpdateRequestDto) -> Result<Self, Self::Error> {
        Self::from_fields(dto.title, dto.content)
    }
}

/// Summary row used by every post listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponseDto {
    pub post_idx: i64,
    pub title: String,
    pub writer: String,
    pub like_count: i64,
    pub created_at: DateTime<Utc>,
}

impl From<&Post> for PostResponseDto {
    fn from(post: &Post) -> Self {
        Self {
            post_idx: post.post_idx,
            title: post.title.clone(),
            writer: post.author_nickname.clone(),
            like_count: post.like_count,
            created_at: post.created_at,
        }
    }
}

impl From<Post> for PostResponseDto {
    fn from(post: Post) -> Self {
        Self::from(&post)
    }
}

/// Detail view of a single post, relative to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostIdxResponseDto {
    pub post_idx: i64,
    pub title: String,
    pub content: String,
    pub writer: String,
    pub writer_email: String,
    pub like_count: i64,
    pub is_writer: bool,
    pub is_liked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostIdxResponseDto {
    pub fn new(post: Post, caller_email: &str, is_liked: bool) -> Self {
        let is_writer = post.is_written_by(caller_email);
        Self {
            post_idx: post.post_idx,
            title: post.title,
            content: post.content,
            writer: post.author_nickname,
            writer_email: post.author_email,
            like_count: post.like_count,
            is_writer,
            is_liked,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientDto {
    pub ingredient_idx: i64,
    pub name: String,
    pub category: String,
    pub score: i32,
}

impl From<Ingredient> for IngredientDto {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            ingredient_idx: ingredient.ingredient_idx,
            name: ingredient.name,
            category: ingredient.category,
            score: ingredient.score,
        }
    }
}

/// Query string of `GET /ingredients`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngredientQuery {
    pub category: Option<String>,
    pub score: Option<i32>,
    pub from: Option<i32>,
    pub to: Option<i32>,
}
