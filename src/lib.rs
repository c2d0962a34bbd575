pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::database::store::VacancyStore;
use crate::services::{
    comment_service::CommentService, user_service::UserService, vacancy_service::VacancyService,
};
use crate::utils::time::Clock;

#[derive(Clone)]
pub struct AppState {
    /// Name of the backing store, reported by the health check.
    pub storage: &'static str,
    pub vacancy_service: VacancyService,
    pub comment_service: CommentService,
    pub user_service: UserService,
}

impl AppState {
    pub fn new(storage: &'static str, store: Arc<dyn VacancyStore>, clock: Arc<dyn Clock>) -> Self {
        let vacancy_service = VacancyService::new(store.clone(), clock.clone());
        let comment_service = CommentService::new(store.clone(), clock.clone());
        let user_service = UserService::new(store, clock);

        Self {
            storage,
            vacancy_service,
            comment_service,
            user_service,
        }
    }
}

/// Builds the HTTP surface of the tracker.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route(
            "/api/dictionaries/vacancy-statuses",
            get(routes::vacancy::list_vacancy_statuses),
        )
        .route("/api/users", axum::routing::post(routes::user::create_user))
        .route(
            "/api/users/:id",
            get(routes::user::get_user).delete(routes::user::delete_user),
        )
        .route(
            "/api/vacancies",
            get(routes::vacancy::list_vacancies).post(routes::vacancy::create_vacancy),
        )
        .route(
            "/api/vacancies/:id",
            get(routes::vacancy::get_vacancy)
                .put(routes::vacancy::update_vacancy)
                .delete(routes::vacancy::delete_vacancy),
        )
        .route(
            "/api/comments",
            get(routes::comment::list_comments).post(routes::comment::create_comment),
        )
        .route(
            "/api/comments/:id",
            get(routes::comment::get_comment)
                .put(routes::comment::update_comment)
                .delete(routes::comment::delete_comment),
        )
        .with_state(state)
        .layer(middleware::cors::permissive_cors())
        .layer(TraceLayer::new_for_http())
}
