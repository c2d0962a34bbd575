use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::database::store::VacancyStore;
use crate::dto::user_dto::CreateUserPayload;
use crate::error::{Error, Result};
use crate::models::user::User;
use crate::utils::time::Clock;
use crate::utils::validation::validate;

/// Registry of the identities that author vacancies and comments.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn VacancyStore>,
    clock: Arc<dyn Clock>,
}

impl UserService {
    pub fn new(store: Arc<dyn VacancyStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn create(&self, payload: CreateUserPayload) -> Result<User> {
        validate(&payload)?;

        let user = User {
            id: Uuid::new_v4(),
            username: payload.username,
            created_at: self.clock.now(),
        };
        self.store.insert_user(&user).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<User> {
        self.store.fetch_user(id).await
    }

    /// Removes the user along with every vacancy and comment they authored.
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        if self.store.delete_user(id).await? == 0 {
            return Err(Error::NotFound(format!("user {} not found", id)));
        }
        info!(user_id = %id, "user deleted with authored records");
        Ok(())
    }
}
