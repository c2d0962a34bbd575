use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::vacancy_dto::{
        StatusOption, VacancyListQuery, VacancyListResponse, VacancyPayload, VacancyResponse,
    },
    error::Result,
    models::vacancy::VacancyStatus,
    routes::extract::{ApiJson, ApiPath, ApiQuery},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/vacancies",
    request_body = VacancyPayload,
    responses(
        (status = 201, description = "Vacancy created successfully", body = Json<VacancyResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 422, description = "Author does not exist")
    )
)]
#[axum::debug_handler]
pub async fn create_vacancy(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<VacancyPayload>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(VacancyResponse::from(vacancy))))
}

#[utoipa::path(
    put,
    path = "/api/vacancies/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    request_body = VacancyPayload,
    responses(
        (status = 200, description = "Vacancy updated successfully", body = Json<VacancyResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 404, description = "Vacancy not found"),
        (status = 422, description = "Author does not exist")
    )
)]
#[axum::debug_handler]
pub async fn update_vacancy(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<VacancyPayload>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.update(id, payload).await?;
    Ok(Json(VacancyResponse::from(vacancy)))
}

#[utoipa::path(
    delete,
    path = "/api/vacancies/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 204, description = "Vacancy and its comments deleted"),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_vacancy(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    state.vacancy_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/vacancies",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("company" = Option<String>, Query, description = "Filter by company"),
        ("author_id" = Option<Uuid>, Query, description = "Filter by author"),
        ("created_from" = Option<String>, Query, description = "Created at or after (RFC 3339)"),
        ("created_to" = Option<String>, Query, description = "Created at or before (RFC 3339)"),
        ("search" = Option<String>, Query, description = "Search title, company and description")
    ),
    responses(
        (status = 200, description = "List of vacancies, newest first", body = Json<VacancyListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_vacancies(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<VacancyListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.vacancy_service.list(query).await?;
    Ok(Json(VacancyListResponse::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/vacancies/{id}",
    params(
        ("id" = Uuid, Path, description = "Vacancy ID")
    ),
    responses(
        (status = 200, description = "Vacancy found", body = Json<VacancyResponse>),
        (status = 404, description = "Vacancy not found")
    )
)]
#[axum::debug_handler]
pub async fn get_vacancy(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let vacancy = state.vacancy_service.get_by_id(id).await?;
    Ok(Json(VacancyResponse::from(vacancy)))
}

#[utoipa::path(
    get,
    path = "/api/dictionaries/vacancy-statuses",
    responses(
        (status = 200, description = "Status values with display labels", body = [StatusOption])
    )
)]
pub async fn list_vacancy_statuses() -> impl IntoResponse {
    let options: Vec<StatusOption> = VacancyStatus::ALL.into_iter().map(Into::into).collect();
    Json(options)
}
