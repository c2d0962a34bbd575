use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::vacancy::{Vacancy, VacancyStatus};
use crate::services::vacancy_service::VacancyList;
use crate::utils::validation::not_blank;

/// Full vacancy record as submitted on create and on update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct VacancyPayload {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: String,
    #[validate(length(min = 1, max = 100), custom(function = "not_blank"))]
    pub company: String,
    #[serde(default)]
    pub description: String,
    pub min_salary: Option<Decimal>,
    pub max_salary: Option<Decimal>,
    #[serde(default)]
    pub status: VacancyStatus,
    pub author_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyResponse {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub min_salary: Option<Decimal>,
    pub max_salary: Option<Decimal>,
    pub status: VacancyStatus,
    pub status_label: String,
    pub created_at: DateTime<Utc>,
    pub status_changed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    pub author_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyListResponse {
    pub items: Vec<VacancyResponse>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VacancyListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<VacancyStatus>,
    pub company: Option<String>,
    pub author_id: Option<Uuid>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_to: Option<DateTime<Utc>>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusOption {
    pub value: VacancyStatus,
    pub label: String,
}

impl From<VacancyStatus> for StatusOption {
    fn from(value: VacancyStatus) -> Self {
        Self {
            value,
            label: value.label().to_string(),
        }
    }
}

impl From<Vacancy> for VacancyResponse {
    fn from(value: Vacancy) -> Self {
        Self {
            id: value.id,
            title: value.title,
            company: value.company,
            description: value.description,
            min_salary: value.min_salary,
            max_salary: value.max_salary,
            status: value.status,
            status_label: value.status.label().to_string(),
            created_at: value.created_at,
            status_changed_at: value.status_changed_at,
            updated_at: value.updated_at,
            author_id: value.author_id,
        }
    }
}

impl From<VacancyList> for VacancyListResponse {
    fn from(value: VacancyList) -> Self {
        Self {
            items: value.items.into_iter().map(Into::into).collect(),
            total: value.total,
            page: value.page,
            per_page: value.per_page,
            total_pages: value.total_pages,
        }
    }
}
