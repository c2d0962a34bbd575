use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::database::store::{CommentFilter, VacancyStore};
use crate::dto::comment_dto::{CommentListQuery, CommentPayload};
use crate::error::{Error, Result};
use crate::models::comment::{Comment, CommentDraft, CommentUpdate};
use crate::services::PageWindow;
use crate::utils::time::Clock;
use crate::utils::validation::validate;

#[derive(Clone)]
pub struct CommentService {
    store: Arc<dyn VacancyStore>,
    clock: Arc<dyn Clock>,
}

pub struct CommentList {
    pub items: Vec<Comment>,
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl CommentService {
    pub fn new(store: Arc<dyn VacancyStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn create(&self, payload: CommentPayload) -> Result<Comment> {
        validate(&payload)?;

        let draft = CommentDraft {
            id: Uuid::new_v4(),
            text: payload.text,
            created_at: self.clock.now(),
            vacancy_id: payload.vacancy_id,
            author_id: payload.author_id,
        };
        let comment = self.store.insert_comment(&draft).await?;
        info!(comment_id = %comment.id, vacancy_id = %comment.vacancy_id, "comment added");
        Ok(comment)
    }

    pub async fn update(&self, id: Uuid, payload: CommentPayload) -> Result<Comment> {
        validate(&payload)?;

        let update = CommentUpdate {
            id,
            text: payload.text,
            vacancy_id: payload.vacancy_id,
            author_id: payload.author_id,
        };
        self.store.update_comment(&update).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Comment> {
        self.store.fetch_comment(id).await
    }

    pub async fn list(&self, query: CommentListQuery) -> Result<CommentList> {
        let window = PageWindow::new(query.page, query.per_page);
        let filter = CommentFilter {
            vacancy_id: query.vacancy_id,
            author_id: query.author_id,
            created_from: query.created_from,
            created_to: query.created_to,
            search: query.search.filter(|s| !s.trim().is_empty()),
        };

        let (items, total) = self
            .store
            .list_comments(&filter, window.store_page())
            .await?;

        Ok(CommentList {
            items,
            total,
            page: window.page,
            per_page: window.per_page,
            total_pages: window.total_pages(total),
        })
    }

    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if self.store.delete_comment(id).await? == 0 {
            return Err(Error::NotFound(format!("comment {} not found", id)));
        }
        Ok(())
    }
}
