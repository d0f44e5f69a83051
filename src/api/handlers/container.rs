//! Container handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use uuid::Uuid;

use crate::api::dto::{CreateContainerRequest, UpdateContainerRequest};
use crate::api::extract::{ApiJson, ApiPath};
use crate::app_state::AppState;
use crate::auth::AuthUser;
use crate::domain::Container;
use crate::error::{ApiError, ErrorResponse};

/// `GET /containers` — The caller's containers.
///
/// # Errors
///
/// Returns [`ApiError`] on persistence failure.
#[utoipa::path(
    get,
    path = "/api/v1/containers",
    tag = "Containers",
    summary = "List containers",
    description = "Favorites first, then by name.",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Containers", body = Vec<Container>),
    )
)]
pub async fn list_containers(
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.container_service.list(caller.user_id).await?))
}

/// `POST /containers` — Define a container.
///
/// # Errors
///
/// Returns [`ApiError`] for invalid fields or an exhausted plan quota.
#[utoipa::path(
    post,
    path = "/api/v1/containers",
    tag = "Containers",
    summary = "Create a container",
    request_body = CreateContainerRequest,
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Container created", body = Container),
        (status = 400, description = "Invalid field", body = ErrorResponse),
        (status = 403, description = "Free plan limit reached", body = ErrorResponse),
    )
)]
pub async fn create_container(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiJson(req): ApiJson<CreateContainerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let container = state.container_service.create(caller.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(container)))
}

/// `GET /containers/{id}` — One container.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if it does not exist for the caller.
#[utoipa::path(
    get,
    path = "/api/v1/containers/{id}",
    tag = "Containers",
    summary = "Get a container",
    params(("id" = Uuid, Path, description = "Container id")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Container", body = Container),
        (status = 404, description = "Not found", body = ErrorResponse),
    )
)]
pub async fn get_container(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(state.container_service.get(caller.user_id, id).await?))
}

/// `PATCH /containers/{id}` — Edit a container.
///
/// # Errors
///
/// Returns [`ApiError`] for unknown containers or invalid fields.
#[utoipa::path(
    patch,
    path = "/api/v1/containers/{id}",
    tag = "Containers",
    summary = "Update a container",
    params(("id" = Uuid, Path, description = "Container id")),
    request_body = UpdateContainerRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Updated container", body = Container),
        (status = 400, description = "Invalid field", body = ErrorResponse),
        (status = 404, description = "Not found", body = ErrorResponse),
    )
)]
pub async fn update_container(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<UpdateContainerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let container = state
        .container_service
        .update(caller.user_id, id, req)
        .await?;
    Ok(Json(container))
}

/// `DELETE /containers/{id}` — Delete a container.
///
/// # Errors
///
/// Returns [`ApiError::NotFound`] if it does not exist for the caller.
#[utoipa::path(
    delete,
    path = "/api/v1/containers/{id}",
    tag = "Containers",
    summary = "Delete a container",
    description = "Past drinks keep their volume but lose the container reference.",
    params(("id" = Uuid, Path, description = "Container id")),
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not found", body = ErrorResponse),
    )
)]
pub async fn delete_container(
    State(state): State<AppState>,
    caller: AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    state.container_service.delete(caller.user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Container routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/containers", get(list_containers).post(create_container))
        .route(
            "/containers/{id}",
            get(get_container)
                .patch(update_container)
                .delete(delete_container),
        )
}
