//! Resource HTTP Routes
//!
//! The uniform CRUD contract, mounted once per resource under
//! `/api/<resource>`.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use crate::resource::ResourceDef;
use crate::rest_api::{
    parse_key, DeleteResponse, MutationResponse, PageQuery, RestError, RestResult,
};

use super::state::AppState;

type SharedState = Arc<AppState>;
type Body = Result<Json<Value>, JsonRejection>;

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct RequisitionPreview {
    pub requisition_no: String,
}

/// Unwrap a JSON body, reporting malformed input as 400
pub(crate) fn json_body(body: Body) -> RestResult<Value> {
    body.map(|Json(value)| value)
        .map_err(|rejection| RestError::InvalidBody(rejection.body_text()))
}

/// Message for a delete that may have matched nothing
pub(crate) fn delete_message(name: &str, deleted: u64) -> String {
    if deleted == 0 {
        format!("No {} matched; nothing deleted", name.to_lowercase())
    } else {
        format!("{} deleted", name)
    }
}

// ==================
// Router
// ==================

/// CRUD routes for one resource
pub fn resource_routes(def: &'static ResourceDef) -> Router<SharedState> {
    let mut router = Router::new()
        .route(
            "/",
            get(
                move |State(state): State<SharedState>,
                      Query(params): Query<HashMap<String, String>>| {
                    list_handler(def, state, params)
                },
            )
            .post(move |State(state): State<SharedState>, body: Body| {
                create_handler(def, state, body)
            })
            .put(move |State(state): State<SharedState>, body: Body| {
                update_handler(def, state, None, body)
            }),
        )
        .route(
            "/:id",
            get(move |State(state): State<SharedState>, Path(id): Path<String>| {
                get_handler(def, state, id)
            })
            .put(
                move |State(state): State<SharedState>, Path(id): Path<String>, body: Body| {
                    update_handler(def, state, Some(id), body)
                },
            )
            .delete(move |State(state): State<SharedState>, Path(id): Path<String>| {
                delete_handler(def, state, id)
            }),
        );

    if def.numbering.is_some() {
        router = router.route(
            "/next-requisition-no",
            get(move |State(state): State<SharedState>| next_number_handler(def, state)),
        );
    }

    router
}

// ==================
// Handlers
// ==================

async fn list_handler(
    def: &'static ResourceDef,
    state: SharedState,
    params: HashMap<String, String>,
) -> RestResult<Response> {
    match def.paging {
        Some(paging) => {
            let query = PageQuery::parse(&params, paging.default_page_size)?;
            let page = state.resources.page(def, &query).await?;
            Ok(Json(page).into_response())
        }
        None => {
            let rows = state.resources.list(def).await?;
            Ok(Json(rows).into_response())
        }
    }
}

async fn get_handler(
    def: &'static ResourceDef,
    state: SharedState,
    id: String,
) -> RestResult<Json<Value>> {
    let key = parse_key(&id)?;
    Ok(Json(state.resources.get(def, key).await?))
}

async fn create_handler(
    def: &'static ResourceDef,
    state: SharedState,
    body: Body,
) -> RestResult<impl IntoResponse> {
    let body = json_body(body)?;
    let row = state.resources.create(def, &body).await?;
    Ok((
        StatusCode::CREATED,
        Json(MutationResponse::new(format!("{} created", def.name), row)),
    ))
}

async fn update_handler(
    def: &'static ResourceDef,
    state: SharedState,
    id: Option<String>,
    body: Body,
) -> RestResult<Json<MutationResponse<Value>>> {
    let key = id.as_deref().map(parse_key).transpose()?;
    let body = json_body(body)?;
    let row = state.resources.update(def, key, &body).await?;
    Ok(Json(MutationResponse::new(
        format!("{} updated", def.name),
        row,
    )))
}

async fn delete_handler(
    def: &'static ResourceDef,
    state: SharedState,
    id: String,
) -> RestResult<Json<DeleteResponse>> {
    let key = parse_key(&id)?;
    let deleted = state.resources.delete(def, key).await?;
    Ok(Json(DeleteResponse::new(
        delete_message(def.name, deleted),
        deleted,
    )))
}

async fn next_number_handler(
    def: &'static ResourceDef,
    state: SharedState,
) -> RestResult<Json<RequisitionPreview>> {
    let requisition_no = state.resources.next_requisition_number(def).await?;
    Ok(Json(RequisitionPreview { requisition_no }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_message() {
        assert_eq!(delete_message("Invoice", 1), "Invoice deleted");
        assert_eq!(
            delete_message("Invoice", 0),
            "No invoice matched; nothing deleted"
        );
    }

    #[test]
    fn test_preview_serialization() {
        let json = serde_json::to_value(RequisitionPreview {
            requisition_no: "IT/5/25-26".to_string(),
        })
        .unwrap();
        assert_eq!(json["requisition_no"], "IT/5/25-26");
    }
}
