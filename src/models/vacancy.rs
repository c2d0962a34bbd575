use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Vacancy {
    pub id: Uuid,
    pub title: String,
    pub company: String,
    pub description: String,
    pub min_salary: Option<Decimal>,
    pub max_salary: Option<Decimal>,
    pub status: VacancyStatus,
    pub created_at: DateTime<Utc>,
    pub status_changed_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
    pub author_id: Uuid,
}

/// Where a vacancy sits in the application workflow.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "vacancy_status", rename_all = "snake_case")]
pub enum VacancyStatus {
    #[default]
    Interesting,
    RequestSent,
    InProgress,
    Rejected,
    NotInteresting,
}

// Wire value and human-readable label for every status, in workflow order.
const STATUS_TABLE: [(VacancyStatus, &str, &str); 5] = [
    (VacancyStatus::Interesting, "interesting", "Интересно"),
    (VacancyStatus::RequestSent, "request_sent", "Отправлен запрос"),
    (VacancyStatus::InProgress, "in_progress", "В работе"),
    (VacancyStatus::Rejected, "rejected", "Отказ"),
    (VacancyStatus::NotInteresting, "not_interesting", "Не интересно"),
];

impl VacancyStatus {
    pub const ALL: [VacancyStatus; 5] = [
        VacancyStatus::Interesting,
        VacancyStatus::RequestSent,
        VacancyStatus::InProgress,
        VacancyStatus::Rejected,
        VacancyStatus::NotInteresting,
    ];

    fn entry(self) -> (VacancyStatus, &'static str, &'static str) {
        STATUS_TABLE[self as usize]
    }

    pub fn as_str(self) -> &'static str {
        self.entry().1
    }

    pub fn label(self) -> &'static str {
        self.entry().2
    }
}

impl fmt::Display for VacancyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VacancyStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STATUS_TABLE
            .iter()
            .find(|(_, value, _)| *value == s)
            .map(|(status, _, _)| *status)
            .ok_or_else(|| format!("unknown vacancy status: {}", s))
    }
}
