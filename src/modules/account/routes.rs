use super::repository;
use crate::{
    modules::auth::middleware::{AdminAuth, Auth},
    types::Context,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

async fn get_me(State(ctx): State<Arc<Context>>, auth: Auth) -> impl IntoResponse {
    let profile = match repository::find_user_profile_by_account_id(
        &ctx.db_conn.pool,
        auth.account.id.clone(),
    )
    .await
    {
        Ok(profile) => profile,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch profile" })),
            );
        }
    };

    let is_profile_complete = repository::is_profile_complete(&auth.account, profile.as_ref());

    (
        StatusCode::OK,
        Json(json!({
            "account": auth.account,
            "profile": profile,
            "is_profile_complete": is_profile_complete,
        })),
    )
}

async fn get_account_by_id(
    State(ctx): State<Arc<Context>>,
    _: AdminAuth,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let account = match repository::find_by_id(&ctx.db_conn.pool, id).await {
        Ok(Some(account)) => account,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Account not found" })),
            );
        }
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch account" })),
            );
        }
    };

    let profile = match repository::find_user_profile_by_account_id(
        &ctx.db_conn.pool,
        account.id.clone(),
    )
    .await
    {
        Ok(profile) => profile,
        Err(_) => {
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch profile" })),
            );
        }
    };

    (
        StatusCode::OK,
        Json(json!({
            "account": account,
            "profile": profile,
        })),
    )
}

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .route("/me", get(get_me))
        .route("/:id", get(get_account_by_id))
}
