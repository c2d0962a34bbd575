use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::database::store::{VacancyFilter, VacancyStore};
use crate::dto::vacancy_dto::{VacancyListQuery, VacancyPayload};
use crate::error::{Error, Result};
use crate::models::vacancy::{Vacancy, VacancyStatus};
use crate::services::PageWindow;
use crate::utils::time::Clock;
use crate::utils::validation::{validate, validate_salaries};

#[derive(Clone)]
pub struct VacancyService {
    store: Arc<dyn VacancyStore>,
    clock: Arc<dyn Clock>,
}

pub struct VacancyList {
    pub items: Vec<Vacancy>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

/// Stamps `status_changed_at` ahead of a save.
///
/// `prior` is the status currently persisted for the record, or `None` when
/// the record has never been saved. A first save is always stamped; later
/// saves only when the status differs from `prior`. Returns whether the
/// timestamp moved.
pub fn apply_status_lifecycle(
    vacancy: &mut Vacancy,
    prior: Option<VacancyStatus>,
    now: DateTime<Utc>,
) -> bool {
    let changed = prior.map_or(true, |prior| prior != vacancy.status);
    if changed {
        vacancy.status_changed_at = Some(now);
    }
    changed
}

fn check_payload(payload: &VacancyPayload) -> Result<()> {
    validate(payload)?;
    validate_salaries(payload.min_salary.as_ref(), payload.max_salary.as_ref())?;
    Ok(())
}

impl VacancyService {
    pub fn new(store: Arc<dyn VacancyStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn create(&self, payload: VacancyPayload) -> Result<Vacancy> {
        check_payload(&payload)?;

        let now = self.clock.now();
        let mut vacancy = Vacancy {
            id: Uuid::new_v4(),
            title: payload.title,
            company: payload.company,
            description: payload.description,
            min_salary: payload.min_salary,
            max_salary: payload.max_salary,
            status: payload.status,
            created_at: now,
            status_changed_at: None,
            updated_at: now,
            author_id: payload.author_id,
        };
        apply_status_lifecycle(&mut vacancy, None, now);

        let vacancy = self.store.insert_vacancy(&vacancy).await?;
        info!(vacancy_id = %vacancy.id, status = %vacancy.status, "vacancy created");
        Ok(vacancy)
    }

    /// Replaces every editable field of an existing vacancy.
    pub async fn update(&self, id: Uuid, payload: VacancyPayload) -> Result<Vacancy> {
        check_payload(&payload)?;

        let existing = self.store.fetch_vacancy(id).await?;
        let vacancy = Vacancy {
            title: payload.title,
            company: payload.company,
            description: payload.description,
            min_salary: payload.min_salary,
            max_salary: payload.max_salary,
            status: payload.status,
            author_id: payload.author_id,
            ..existing
        };

        self.save(vacancy).await
    }

    /// Persists an already stored vacancy, re-reading its status first so
    /// the change stamp does not depend on how the record was built.
    pub async fn save(&self, mut vacancy: Vacancy) -> Result<Vacancy> {
        let prior = self.store.fetch_vacancy_status(vacancy.id).await?;
        let now = self.clock.now();

        if apply_status_lifecycle(&mut vacancy, Some(prior), now) {
            info!(
                vacancy_id = %vacancy.id,
                from = %prior,
                to = %vacancy.status,
                "vacancy status changed"
            );
        }
        vacancy.updated_at = now;

        self.store.update_vacancy(&vacancy).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Vacancy> {
        self.store.fetch_vacancy(id).await
    }

    pub async fn list(&self, query: VacancyListQuery) -> Result<VacancyList> {
        let window = PageWindow::new(query.page, query.per_page);
        let filter = VacancyFilter {
            status: query.status,
            company: query.company,
            author_id: query.author_id,
            created_from: query.created_from,
            created_to: query.created_to,
            search: query.search.filter(|s| !s.trim().is_empty()),
        };

        let (items, total) = self
            .store
            .list_vacancies(&filter, window.store_page())
            .await?;

        Ok(VacancyList {
            items,
            total,
            page: window.page,
            per_page: window.per_page,
            total_pages: window.total_pages(total),
        })
    }

    /// Deletes a vacancy together with its comments.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if self.store.delete_vacancy(id).await? == 0 {
            return Err(Error::NotFound(format!("vacancy {} not found", id)));
        }
        info!(vacancy_id = %id, "vacancy deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use mockall::predicate::eq;

    use super::*;
    use crate::database::store::MockVacancyStore;
    use crate::utils::time::ManualClock;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    fn stored(status: VacancyStatus) -> Vacancy {
        Vacancy {
            id: Uuid::new_v4(),
            title: "Platform engineer".into(),
            company: "Acme".into(),
            description: String::new(),
            min_salary: None,
            max_salary: None,
            status,
            created_at: t0(),
            status_changed_at: Some(t0()),
            updated_at: t0(),
            author_id: Uuid::new_v4(),
        }
    }

    fn payload_for(vacancy: &Vacancy, status: VacancyStatus) -> VacancyPayload {
        VacancyPayload {
            title: vacancy.title.clone(),
            company: vacancy.company.clone(),
            description: "updated".into(),
            min_salary: None,
            max_salary: None,
            status,
            author_id: vacancy.author_id,
        }
    }

    #[test]
    fn first_save_is_always_stamped() {
        for status in VacancyStatus::ALL {
            let mut vacancy = stored(status);
            vacancy.status_changed_at = None;
            assert!(apply_status_lifecycle(&mut vacancy, None, t0()));
            assert_eq!(vacancy.status_changed_at, Some(t0()));
        }
    }

    #[test]
    fn unchanged_status_keeps_stamp() {
        let mut vacancy = stored(VacancyStatus::Rejected);
        let later = t0() + Duration::hours(1);
        assert!(!apply_status_lifecycle(
            &mut vacancy,
            Some(VacancyStatus::Rejected),
            later
        ));
        assert_eq!(vacancy.status_changed_at, Some(t0()));

        assert!(apply_status_lifecycle(
            &mut vacancy,
            Some(VacancyStatus::InProgress),
            later
        ));
        assert_eq!(vacancy.status_changed_at, Some(later));
    }

    #[tokio::test]
    async fn update_reads_prior_status_exactly_once() {
        let existing = stored(VacancyStatus::Interesting);
        let id = existing.id;
        let clock = ManualClock::new(t0() + Duration::minutes(5));

        let mut store = MockVacancyStore::new();
        let loaded = existing.clone();
        store
            .expect_fetch_vacancy()
            .with(eq(id))
            .times(1)
            .returning(move |_| Ok(loaded.clone()));
        store
            .expect_fetch_vacancy_status()
            .with(eq(id))
            .times(1)
            .returning(|_| Ok(VacancyStatus::Interesting));
        store
            .expect_update_vacancy()
            .times(1)
            .returning(|v| Ok(v.clone()));

        let service = VacancyService::new(Arc::new(store), Arc::new(clock));
        let saved = service
            .update(id, payload_for(&existing, VacancyStatus::InProgress))
            .await
            .unwrap();

        assert_eq!(saved.status, VacancyStatus::InProgress);
        assert_eq!(saved.status_changed_at, Some(t0() + Duration::minutes(5)));
        assert_eq!(saved.updated_at, t0() + Duration::minutes(5));
        assert_eq!(saved.created_at, t0());
    }

    #[tokio::test]
    async fn create_never_reads_prior_status() {
        let mut store = MockVacancyStore::new();
        store.expect_fetch_vacancy_status().never();
        store
            .expect_insert_vacancy()
            .times(1)
            .returning(|v| Ok(v.clone()));

        let service = VacancyService::new(Arc::new(store), Arc::new(ManualClock::new(t0())));
        let created = service
            .create(payload_for(&stored(VacancyStatus::Interesting), VacancyStatus::Rejected))
            .await
            .unwrap();

        assert_eq!(created.created_at, t0());
        assert_eq!(created.status_changed_at, Some(t0()));
        assert_eq!(created.updated_at, t0());
    }

    #[tokio::test]
    async fn invalid_payload_never_reaches_the_store() {
        let mut store = MockVacancyStore::new();
        store.expect_insert_vacancy().never();

        let service = VacancyService::new(Arc::new(store), Arc::new(ManualClock::new(t0())));
        let mut payload = payload_for(&stored(VacancyStatus::Interesting), VacancyStatus::Interesting);
        payload.max_salary = Some(rust_decimal::Decimal::new(12345, 3));

        let err = service.create(payload).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn store_errors_propagate_unchanged() {
        let mut store = MockVacancyStore::new();
        store
            .expect_insert_vacancy()
            .returning(|_| Err(Error::ReferentialIntegrity("user missing".into())));

        let service = VacancyService::new(Arc::new(store), Arc::new(ManualClock::new(t0())));
        let err = service
            .create(payload_for(&stored(VacancyStatus::Interesting), VacancyStatus::Interesting))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ReferentialIntegrity(msg) if msg == "user missing"));
    }

    #[tokio::test]
    async fn deleting_missing_vacancy_is_not_found() {
        let mut store = MockVacancyStore::new();
        store.expect_delete_vacancy().returning(|_| Ok(0));

        let service = VacancyService::new(Arc::new(store), Arc::new(ManualClock::new(t0())));
        let err = service.delete(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
