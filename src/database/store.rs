use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::comment::{Comment, CommentDraft, CommentUpdate};
use crate::models::user::User;
use crate::models::vacancy::{Vacancy, VacancyStatus};

/// Field filters for vacancy listings. Every set field must match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VacancyFilter {
    pub status: Option<VacancyStatus>,
    pub company: Option<String>,
    pub author_id: Option<Uuid>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    /// Case-insensitive substring of title, company or description.
    pub search: Option<String>,
}

impl VacancyFilter {
    pub fn matches(&self, vacancy: &Vacancy) -> bool {
        self.status.map_or(true, |s| vacancy.status == s)
            && self.company.as_ref().map_or(true, |c| vacancy.company == *c)
            && self.author_id.map_or(true, |a| vacancy.author_id == a)
            && self.created_from.map_or(true, |t| vacancy.created_at >= t)
            && self.created_to.map_or(true, |t| vacancy.created_at <= t)
            && self.search.as_deref().map_or(true, |needle| {
                contains_ci(&vacancy.title, needle)
                    || contains_ci(&vacancy.company, needle)
                    || contains_ci(&vacancy.description, needle)
            })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentFilter {
    pub vacancy_id: Option<Uuid>,
    pub author_id: Option<Uuid>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    /// Case-insensitive substring of the comment text or the vacancy title.
    pub search: Option<String>,
}

impl CommentFilter {
    pub fn matches(&self, comment: &Comment) -> bool {
        self.vacancy_id.map_or(true, |v| comment.vacancy_id == v)
            && self.author_id.map_or(true, |a| comment.author_id == a)
            && self.created_from.map_or(true, |t| comment.created_at >= t)
            && self.created_to.map_or(true, |t| comment.created_at <= t)
            && self.search.as_deref().map_or(true, |needle| {
                contains_ci(&comment.text, needle) || contains_ci(&comment.vacancy_title, needle)
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Persistence operations for users, vacancies and comments.
///
/// Implementations enforce the references between records: inserting or
/// updating a row that points at a missing user or vacancy fails with
/// `Error::ReferentialIntegrity`, and deleting a user or vacancy removes
/// everything that depends on it. Listings are ordered newest first.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VacancyStore: Send + Sync {
    async fn insert_user(&self, user: &User) -> Result<User>;

    async fn fetch_user(&self, id: Uuid) -> Result<User>;

    /// Returns the number of users removed.
    async fn delete_user(&self, id: Uuid) -> Result<u64>;

    async fn insert_vacancy(&self, vacancy: &Vacancy) -> Result<Vacancy>;

    async fn fetch_vacancy(&self, id: Uuid) -> Result<Vacancy>;

    /// Reads only the persisted status of a vacancy.
    async fn fetch_vacancy_status(&self, id: Uuid) -> Result<VacancyStatus>;

    /// Overwrites every mutable column; `created_at` is left as stored.
    async fn update_vacancy(&self, vacancy: &Vacancy) -> Result<Vacancy>;

    async fn delete_vacancy(&self, id: Uuid) -> Result<u64>;

    /// Returns the requested page and the total number of matches.
    async fn list_vacancies(
        &self,
        filter: &VacancyFilter,
        page: Page,
    ) -> Result<(Vec<Vacancy>, i64)>;

    async fn insert_comment(&self, comment: &CommentDraft) -> Result<Comment>;

    async fn fetch_comment(&self, id: Uuid) -> Result<Comment>;

    /// Overwrites text, vacancy and author; `created_at` is left as stored.
    async fn update_comment(&self, comment: &CommentUpdate) -> Result<Comment>;

    async fn delete_comment(&self, id: Uuid) -> Result<u64>;

    async fn list_comments(
        &self,
        filter: &CommentFilter,
        page: Page,
    ) -> Result<(Vec<Comment>, i64)>;
}
