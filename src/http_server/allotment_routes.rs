//! Asset Allotment HTTP Routes
//!
//! Literal segments (`users`, `current`, `by-user`, `return`) are distinct
//! routes, so they never parse as an allotment id.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use serde_json::Value;

use crate::allotment::{Allotment, CurrentAllotment, UserAllotment, ASSET_ALLOTMENT};
use crate::rest_api::{key_from_body, parse_key, DeleteResponse, MutationResponse, RestResult};

use super::resource_routes::{delete_message, json_body};
use super::state::AppState;

type SharedState = Arc<AppState>;
type Body = Result<Json<Value>, axum::extract::rejection::JsonRejection>;

/// Create allotment routes
pub fn allotment_routes() -> Router<SharedState> {
    Router::new()
        .route(
            "/",
            get(list_handler).post(create_handler).put(update_body_handler),
        )
        .route("/users", get(users_handler))
        .route("/current", get(current_handler))
        .route("/by-user/:username", get(by_user_handler))
        .route("/return/:id", put(return_handler))
        .route(
            "/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
}

async fn list_handler(State(state): State<SharedState>) -> RestResult<Json<Vec<Allotment>>> {
    Ok(Json(state.allotments.list().await?))
}

async fn users_handler(State(state): State<SharedState>) -> RestResult<Json<Vec<String>>> {
    Ok(Json(state.allotments.list_users().await?))
}

async fn current_handler(
    State(state): State<SharedState>,
) -> RestResult<Json<Vec<CurrentAllotment>>> {
    Ok(Json(state.allotments.current().await?))
}

async fn by_user_handler(
    State(state): State<SharedState>,
    Path(username): Path<String>,
) -> RestResult<Json<Vec<UserAllotment>>> {
    Ok(Json(state.allotments.by_user(&username).await?))
}

async fn get_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> RestResult<Json<Allotment>> {
    let id = parse_key(&id)?;
    Ok(Json(state.allotments.get(id).await?))
}

async fn create_handler(
    State(state): State<SharedState>,
    body: Body,
) -> RestResult<impl IntoResponse> {
    let body = json_body(body)?;
    let row = state.allotments.create(&body).await?;
    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new("Asset item allotted successfully", row)),
    ))
}

async fn update_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    body: Body,
) -> RestResult<Json<MutationResponse<Allotment>>> {
    let id = parse_key(&id)?;
    let body = json_body(body)?;
    let row = state.allotments.update(id, &body).await?;
    Ok(Json(MutationResponse::new("Asset allotment updated", row)))
}

async fn update_body_handler(
    State(state): State<SharedState>,
    body: Body,
) -> RestResult<Json<MutationResponse<Allotment>>> {
    let body = json_body(body)?;
    let id = key_from_body(&body, ASSET_ALLOTMENT.key.json)?;
    let row = state.allotments.update(id, &body).await?;
    Ok(Json(MutationResponse::new("Asset allotment updated", row)))
}

async fn return_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> RestResult<Json<MutationResponse<Allotment>>> {
    let id = parse_key(&id)?;
    let row = state.allotments.return_asset(id).await?;
    Ok(Json(MutationResponse::new(
        "Asset item returned successfully",
        row,
    )))
}

async fn delete_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> RestResult<Json<DeleteResponse>> {
    let id = parse_key(&id)?;
    let deleted = state.allotments.delete(id).await?;
    Ok(Json(DeleteResponse::new(
        delete_message(ASSET_ALLOTMENT.name, deleted),
        deleted,
    )))
}
