use super::service::service;
use super::types::request;
use crate::{types::Context, utils};
use axum::{
    extract::{Json, State},
    response::IntoResponse,
};
use std::sync::Arc;
use validator::Validate;

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    Json(payload): Json<request::Payload>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return utils::validation::into_response(errors).into_response();
    }

    service(ctx, payload).await.into_response()
}
