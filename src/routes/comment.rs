use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use uuid::Uuid;

use crate::{
    dto::comment_dto::{CommentListQuery, CommentListResponse, CommentPayload, CommentResponse},
    error::Result,
    routes::extract::{ApiJson, ApiPath, ApiQuery},
    AppState,
};

#[utoipa::path(
    post,
    path = "/api/comments",
    request_body = CommentPayload,
    responses(
        (status = 201, description = "Comment created", body = Json<CommentResponse>),
        (status = 400, description = "Invalid payload"),
        (status = 422, description = "Vacancy or author does not exist")
    )
)]
#[axum::debug_handler]
pub async fn create_comment(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CommentPayload>,
) -> Result<impl IntoResponse> {
    let comment = state.comment_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

#[utoipa::path(
    put,
    path = "/api/comments/{id}",
    params(
        ("id" = Uuid, Path, description = "Comment ID")
    ),
    request_body = CommentPayload,
    responses(
        (status = 200, description = "Comment updated", body = Json<CommentResponse>),
        (status = 404, description = "Comment not found")
    )
)]
#[axum::debug_handler]
pub async fn update_comment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<CommentPayload>,
) -> Result<impl IntoResponse> {
    let comment = state.comment_service.update(id, payload).await?;
    Ok(Json(CommentResponse::from(comment)))
}

#[utoipa::path(
    delete,
    path = "/api/comments/{id}",
    params(
        ("id" = Uuid, Path, description = "Comment ID")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 404, description = "Comment not found")
    )
)]
#[axum::debug_handler]
pub async fn delete_comment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    state.comment_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/comments",
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page"),
        ("vacancy_id" = Option<Uuid>, Query, description = "Filter by vacancy"),
        ("author_id" = Option<Uuid>, Query, description = "Filter by author"),
        ("created_from" = Option<String>, Query, description = "Created at or after (RFC 3339)"),
        ("created_to" = Option<String>, Query, description = "Created at or before (RFC 3339)"),
        ("search" = Option<String>, Query, description = "Search comment text and vacancy title")
    ),
    responses(
        (status = 200, description = "List of comments, newest first", body = Json<CommentListResponse>)
    )
)]
#[axum::debug_handler]
pub async fn list_comments(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<CommentListQuery>,
) -> Result<impl IntoResponse> {
    let result = state.comment_service.list(query).await?;
    Ok(Json(CommentListResponse::from(result)))
}

#[utoipa::path(
    get,
    path = "/api/comments/{id}",
    params(
        ("id" = Uuid, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment found", body = Json<CommentResponse>),
        (status = 404, description = "Comment not found")
    )
)]
#[axum::debug_handler]
pub async fn get_comment(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse> {
    let comment = state.comment_service.get_by_id(id).await?;
    Ok(Json(CommentResponse::from(comment)))
}
