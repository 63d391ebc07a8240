//! User API endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::info;

use taskdeck_core::{NewUser, Task, User, UserId, UserUpdate};

use super::{store_error, ApiError};
use crate::state::AppState;

/// GET /api/users
async fn list_users(State(state): State<AppState>) -> Json<Vec<User>> {
    Json(state.store().list_users().await)
}

/// POST /api/users
async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<NewUser>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let created = state.store().create_user(req).await.map_err(store_error)?;
    info!("Created user {}", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/users/:id
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<User>, ApiError> {
    state.store().get_user(id).await.map(Json).map_err(store_error)
}

/// PUT /api/users/:id - Update name and/or email
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
    Json(req): Json<UserUpdate>,
) -> Result<Json<User>, ApiError> {
    let updated = state
        .store()
        .update_user(id, req)
        .await
        .map_err(store_error)?;
    info!("Updated user {}", id);
    Ok(Json(updated))
}

/// DELETE /api/users/:id
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<StatusCode, ApiError> {
    state.store().delete_user(id).await.map_err(store_error)?;
    info!("Deleted user {}", id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users/:id/tasks
async fn list_user_tasks(
    State(state): State<AppState>,
    Path(id): Path<UserId>,
) -> Result<Json<Vec<Task>>, ApiError> {
    state
        .store()
        .user_tasks(id)
        .await
        .map(Json)
        .map_err(store_error)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route(
            "/api/users/{id}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/api/users/{id}/tasks", get(list_user_tasks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::Request,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn send(state: &AppState, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router()
            .with_state(state.clone())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, payload)
    }

    #[tokio::test]
    async fn create_never_echoes_password() {
        let state = AppState::new();
        let (status, payload) = send(
            &state,
            "POST",
            "/api/users",
            Some(json!({"name": "Ada", "email": "ada@example.com", "password": "pw"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(payload["name"], "Ada");
        assert!(payload.get("password").is_none());
        assert!(payload["createdAt"].is_string());
    }

    #[tokio::test]
    async fn create_requires_password() {
        let state = AppState::new();
        let (status, _) = send(
            &state,
            "POST",
            "/api/users",
            Some(json!({"name": "Ada", "email": "ada@example.com", "password": ""})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_delete_and_tasks() {
        let state = AppState::new();
        send(
            &state,
            "POST",
            "/api/users",
            Some(json!({"name": "Ada", "email": "ada@example.com", "password": "pw"})),
        )
        .await;

        let (status, payload) =
            send(&state, "PUT", "/api/users/1", Some(json!({"name": "Ada L."}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["name"], "Ada L.");
        assert_eq!(payload["email"], "ada@example.com");

        let (status, tasks) = send(&state, "GET", "/api/users/1/tasks", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(tasks, json!([]));

        let (status, _) = send(&state, "DELETE", "/api/users/1", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&state, "GET", "/api/users/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
