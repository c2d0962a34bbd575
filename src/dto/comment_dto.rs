use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::comment::Comment;
use crate::services::comment_service::CommentList;
use crate::utils::validation::not_blank;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CommentPayload {
    #[validate(length(min = 1), custom(function = "not_blank"))]
    pub text: String,
    pub vacancy_id: Uuid,
    pub author_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: Uuid,
    pub text: String,
    pub preview: String,
    pub created_at: DateTime<Utc>,
    pub vacancy_id: Uuid,
    pub vacancy_title: String,
    pub author_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentListResponse {
    pub items: Vec<CommentResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CommentListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub vacancy_id: Option<Uuid>,
    pub author_id: Option<Uuid>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    pub search: Option<String>,
}

impl From<Comment> for CommentResponse {
    fn from(value: Comment) -> Self {
        Self {
            preview: value.preview(),
            id: value.id,
            text: value.text,
            created_at: value.created_at,
            vacancy_id: value.vacancy_id,
            vacancy_title: value.vacancy_title,
            author_id: value.author_id,
        }
    }
}

impl From<CommentList> for CommentListResponse {
    fn from(value: CommentList) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
            total_pages: value.total_pages,
        }
    }
}
