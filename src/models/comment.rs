use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::utils::text::preview;

pub const PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub vacancy_id: Uuid,
    pub author_id: Uuid,
    /// Title of the owning vacancy, joined in by the store.
    pub vacancy_title: String,
}

impl Comment {
    pub fn preview(&self) -> String {
        preview(&self.text, PREVIEW_CHARS)
    }
}

/// Write-side shape of a comment; the store resolves `vacancy_title` itself.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentDraft {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub vacancy_id: Uuid,
    pub author_id: Uuid,
}

/// Full replacement of a comment's editable fields; `created_at` never changes.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentUpdate {
    pub id: Uuid,
    pub text: String,
    pub vacancy_id: Uuid,
    pub author_id: Uuid,
}

impl CommentUpdate {
    pub fn into_draft(self, created_at: DateTime<Utc>) -> CommentDraft {
        CommentDraft {
            id: self.id,
            text: self.text,
            created_at,
            vacancy_id: self.vacancy_id,
            author_id: self.author_id,
        }
    }
}

impl CommentDraft {
    pub fn into_comment(self, vacancy_title: String) -> Comment {
        Comment {
            id: self.id,
            text: self.text,
            created_at: self.created_at,
            vacancy_id: self.vacancy_id,
            author_id: self.author_id,
            vacancy_title,
        }
    }
}
