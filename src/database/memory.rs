use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::database::store::{CommentFilter, Page, VacancyFilter, VacancyStore};
use crate::error::{Error, Result};
use crate::models::comment::{Comment, CommentDraft, CommentUpdate};
use crate::models::user::User;
use crate::models::vacancy::{Vacancy, VacancyStatus};

#[derive(Debug, Default)]
struct State {
    users: HashMap<Uuid, User>,
    vacancies: HashMap<Uuid, Vacancy>,
    comments: HashMap<Uuid, CommentDraft>,
}

impl State {
    fn require_user(&self, id: Uuid) -> Result<()> {
        if self.users.contains_key(&id) {
            Ok(())
        } else {
            Err(Error::ReferentialIntegrity(format!("user {} does not exist", id)))
        }
    }

    fn require_vacancy(&self, id: Uuid) -> Result<&Vacancy> {
        self.vacancies
            .get(&id)
            .ok_or_else(|| Error::ReferentialIntegrity(format!("vacancy {} does not exist", id)))
    }

    fn joined(&self, draft: &CommentDraft) -> Result<Comment> {
        let title = self.require_vacancy(draft.vacancy_id)?.title.clone();
        Ok(draft.clone().into_comment(title))
    }

    fn remove_vacancies_where(&mut self, doomed: impl Fn(&Vacancy) -> bool) -> usize {
        let ids: Vec<Uuid> = self
            .vacancies
            .values()
            .filter(|v| doomed(v))
            .map(|v| v.id)
            .collect();
        for id in &ids {
            self.vacancies.remove(id);
        }
        self.comments.retain(|_, c| !ids.contains(&c.vacancy_id));
        ids.len()
    }
}

/// Process-local store with the same reference and cascade rules as the
/// Postgres schema. Used when no database is configured, and in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Result<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| Error::Internal("memory store lock poisoned".to_string()))
    }
}

fn not_found(kind: &str, id: Uuid) -> Error {
    Error::NotFound(format!("{} {} not found", kind, id))
}

fn paginate<T>(mut items: Vec<T>, page: Page) -> (Vec<T>, i64) {
    let total = items.len() as i64;
    let offset = page.offset.max(0) as usize;
    let limit = page.limit.max(0) as usize;
    let items = if offset >= items.len() {
        Vec::new()
    } else {
        items.drain(offset..).take(limit).collect()
    };
    (items, total)
}

#[async_trait]
impl VacancyStore for MemoryStore {
    async fn insert_user(&self, user: &User) -> Result<User> {
        let mut state = self.state()?;
        if state.users.values().any(|u| u.username == user.username) {
            return Err(Error::BadRequest(format!(
                "username {} is already taken",
                user.username
            )));
        }
        state.users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn fetch_user(&self, id: Uuid) -> Result<User> {
        self.state()?
            .users
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("user", id))
    }

    async fn delete_user(&self, id: Uuid) -> Result<u64> {
        let mut state = self.state()?;
        if state.users.remove(&id).is_none() {
            return Ok(0);
        }
        state.remove_vacancies_where(|v| v.author_id == id);
        state.comments.retain(|_, c| c.author_id != id);
        Ok(1)
    }

    async fn insert_vacancy(&self, vacancy: &Vacancy) -> Result<Vacancy> {
        let mut state = self.state()?;
        state.require_user(vacancy.author_id)?;
        state.vacancies.insert(vacancy.id, vacancy.clone());
        Ok(vacancy.clone())
    }

    async fn fetch_vacancy(&self, id: Uuid) -> Result<Vacancy> {
        self.state()?
            .vacancies
            .get(&id)
            .cloned()
            .ok_or_else(|| not_found("vacancy", id))
    }

    async fn fetch_vacancy_status(&self, id: Uuid) -> Result<VacancyStatus> {
        self.state()?
            .vacancies
            .get(&id)
            .map(|v| v.status)
            .ok_or_else(|| not_found("vacancy", id))
    }

    async fn update_vacancy(&self, vacancy: &Vacancy) -> Result<Vacancy> {
        let mut state = self.state()?;
        let created_at = state
            .vacancies
            .get(&vacancy.id)
            .map(|v| v.created_at)
            .ok_or_else(|| not_found("vacancy", vacancy.id))?;
        state.require_user(vacancy.author_id)?;

        let stored = Vacancy {
            created_at,
            ..vacancy.clone()
        };
        state.vacancies.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn delete_vacancy(&self, id: Uuid) -> Result<u64> {
        let removed = self.state()?.remove_vacancies_where(|v| v.id == id);
        Ok(removed as u64)
    }

    async fn list_vacancies(
        &self,
        filter: &VacancyFilter,
        page: Page,
    ) -> Result<(Vec<Vacancy>, i64)> {
        let state = self.state()?;
        let mut items: Vec<Vacancy> = state
            .vacancies
            .values()
            .filter(|v| filter.matches(v))
            .cloned()
            .collect();
        items.sort_by_key(|v| Reverse((v.created_at, v.id)));
        Ok(paginate(items, page))
    }

    async fn insert_comment(&self, comment: &CommentDraft) -> Result<Comment> {
        let mut state = self.state()?;
        state.require_user(comment.author_id)?;
        let joined = state.joined(comment)?;
        state.comments.insert(comment.id, comment.clone());
        Ok(joined)
    }

    async fn fetch_comment(&self, id: Uuid) -> Result<Comment> {
        let state = self.state()?;
        let draft = state.comments.get(&id).ok_or_else(|| not_found("comment", id))?;
        state.joined(draft)
    }

    async fn update_comment(&self, comment: &CommentUpdate) -> Result<Comment> {
        let mut state = self.state()?;
        let created_at = state
            .comments
            .get(&comment.id)
            .map(|c| c.created_at)
            .ok_or_else(|| not_found("comment", comment.id))?;
        state.require_user(comment.author_id)?;

        let stored = comment.clone().into_draft(created_at);
        let joined = state.joined(&stored)?;
        state.comments.insert(stored.id, stored);
        Ok(joined)
    }

    async fn delete_comment(&self, id: Uuid) -> Result<u64> {
        let removed = self.state()?.comments.remove(&id);
        Ok(u64::from(removed.is_some()))
    }

    async fn list_comments(
        &self,
        filter: &CommentFilter,
        page: Page,
    ) -> Result<(Vec<Comment>, i64)> {
        let state = self.state()?;
        let mut items = Vec::new();
        for draft in state.comments.values() {
            let comment = state.joined(draft)?;
            if filter.matches(&comment) {
                items.push(comment);
            }
        }
        items.sort_by_key(|c| Reverse((c.created_at, c.id)));
        Ok(paginate(items, page))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn user(name: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: name.to_string(),
            created_at: Utc::now(),
        }
    }

    fn vacancy(author_id: Uuid, title: &str) -> Vacancy {
        let now = Utc::now();
        Vacancy {
            id: Uuid::new_v4(),
            title: title.to_string(),
            company: "Acme".to_string(),
            description: String::new(),
            min_salary: None,
            max_salary: None,
            status: VacancyStatus::Interesting,
            created_at: now,
            status_changed_at: Some(now),
            updated_at: now,
            author_id,
        }
    }

    fn comment(vacancy_id: Uuid, author_id: Uuid, text: &str) -> CommentDraft {
        CommentDraft {
            id: Uuid::new_v4(),
            text: text.to_string(),
            created_at: Utc::now(),
            vacancy_id,
            author_id,
        }
    }

    const ALL: Page = Page {
        limit: 100,
        offset: 0,
    };

    #[tokio::test]
    async fn unknown_author_is_a_reference_error() {
        let store = MemoryStore::new();
        let err = store
            .insert_vacancy(&vacancy(Uuid::new_v4(), "Orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ReferentialIntegrity(_)));
        assert_eq!(store.list_vacancies(&VacancyFilter::default(), ALL).await.unwrap().1, 0);
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = MemoryStore::new();
        store.insert_user(&user("ann")).await.unwrap();
        let err = store.insert_user(&user("ann")).await.unwrap_err();
        assert!(matches!(err, Error::BadRequest(_)));
    }

    #[tokio::test]
    async fn update_keeps_stored_created_at() {
        let store = MemoryStore::new();
        let author = store.insert_user(&user("ann")).await.unwrap();
        let original = store.insert_vacancy(&vacancy(author.id, "Dev")).await.unwrap();

        let mut changed = original.clone();
        changed.created_at = original.created_at + Duration::days(3);
        changed.title = "Senior dev".to_string();
        let stored = store.update_vacancy(&changed).await.unwrap();

        assert_eq!(stored.created_at, original.created_at);
        assert_eq!(stored.title, "Senior dev");
    }

    #[tokio::test]
    async fn comment_update_keeps_creation_time_and_rejoins_title() {
        let store = MemoryStore::new();
        let ann = store.insert_user(&user("ann")).await.unwrap();
        let first = store.insert_vacancy(&vacancy(ann.id, "First")).await.unwrap();
        let second = store.insert_vacancy(&vacancy(ann.id, "Second")).await.unwrap();
        let original = store.insert_comment(&comment(first.id, ann.id, "draft")).await.unwrap();

        let updated = store
            .update_comment(&CommentUpdate {
                id: original.id,
                text: "final".to_string(),
                vacancy_id: second.id,
                author_id: ann.id,
            })
            .await
            .unwrap();

        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.text, "final");
        assert_eq!(updated.vacancy_title, "Second");
    }

    #[tokio::test]
    async fn deleting_a_user_cascades_through_vacancies_to_comments() {
        let store = MemoryStore::new();
        let ann = store.insert_user(&user("ann")).await.unwrap();
        let bob = store.insert_user(&user("bob")).await.unwrap();
        let anns = store.insert_vacancy(&vacancy(ann.id, "Ann's")).await.unwrap();
        let bobs = store.insert_vacancy(&vacancy(bob.id, "Bob's")).await.unwrap();
        // bob comments on ann's vacancy, ann comments on bob's
        store.insert_comment(&comment(anns.id, bob.id, "hi")).await.unwrap();
        store.insert_comment(&comment(bobs.id, ann.id, "hey")).await.unwrap();
        let kept = store.insert_comment(&comment(bobs.id, bob.id, "mine")).await.unwrap();

        assert_eq!(store.delete_user(ann.id).await.unwrap(), 1);

        let (vacancies, _) = store.list_vacancies(&VacancyFilter::default(), ALL).await.unwrap();
        assert_eq!(vacancies.iter().map(|v| v.id).collect::<Vec<_>>(), vec![bobs.id]);
        let (comments, _) = store.list_comments(&CommentFilter::default(), ALL).await.unwrap();
        assert_eq!(comments.iter().map(|c| c.id).collect::<Vec<_>>(), vec![kept.id]);
    }

    #[tokio::test]
    async fn pagination_reports_total() {
        let store = MemoryStore::new();
        let author = store.insert_user(&user("ann")).await.unwrap();
        for i in 0..5 {
            let mut v = vacancy(author.id, &format!("v{}", i));
            v.created_at += Duration::seconds(i);
            store.insert_vacancy(&v).await.unwrap();
        }

        let page = Page {
            limit: 2,
            offset: 4,
        };
        let (items, total) = store.list_vacancies(&VacancyFilter::default(), page).await.unwrap();
        assert_eq!(total, 5);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "v0");
    }
}
