//! HTTP handlers for `/AdminNotification`.
//!
//! Extraction failures are answered with a failure envelope rather than the
//! framework's plain-text rejection, so every route speaks the same shape.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};

use crate::directory::RequestContext;
use crate::server::AppState;

use super::envelope::AdminResponse;
use super::models::{BroadcastQuery, SendTestQuery, SendToRolesRequest};
use super::service::AdminNotifier;

/// GET /AdminNotification/sendTest
pub async fn send_test(
    State(state): State<AppState>,
    query: Result<Query<SendTestQuery>, QueryRejection>,
) -> AdminResponse {
    match query {
        Ok(Query(query)) => state.notifier.send_test(query).await,
        Err(rejection) => invalid_query(rejection),
    }
}

/// GET /AdminNotification/broadcast
pub async fn broadcast(
    State(state): State<AppState>,
    query: Result<Query<BroadcastQuery>, QueryRejection>,
) -> AdminResponse {
    match query {
        Ok(Query(query)) => state.notifier.broadcast(query).await,
        Err(rejection) => invalid_query(rejection),
    }
}

/// GET /AdminNotification/preload
pub async fn preload(State(state): State<AppState>) -> AdminResponse {
    let ctx = RequestContext::new();
    state.notifier.preload(&ctx).await
}

/// POST /AdminNotification/sendToRoles
pub async fn send_to_roles(
    State(state): State<AppState>,
    request: Result<Json<SendToRolesRequest>, JsonRejection>,
) -> AdminResponse {
    match request {
        Ok(Json(request)) => {
            let ctx = RequestContext::new();
            state.notifier.send_to_roles(request, &ctx).await
        }
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Rejected sendToRoles body");
            AdminResponse::failure(format!("Invalid request body: {}", rejection.body_text()))
        }
    }
}

/// POST /AdminNotification/
pub async fn info() -> AdminResponse {
    AdminNotifier::info()
}

fn invalid_query(rejection: QueryRejection) -> AdminResponse {
    tracing::debug!(error = %rejection.body_text(), "Rejected query string");
    AdminResponse::failure(format!("Invalid query: {}", rejection.body_text()))
}
