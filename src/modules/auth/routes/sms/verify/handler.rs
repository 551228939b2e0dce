use super::service::service;
use super::types::{request, response};
use crate::modules::account::repository::Role;
use crate::modules::auth::service::token::ClientInfo;
use crate::{types::Context, utils};
use axum::{
    extract::{ConnectInfo, Json, Path, State},
    http::{header, HeaderMap},
    response::IntoResponse,
};
use std::net::SocketAddr;
use std::sync::Arc;
use validator::Validate;

fn client_info(headers: &HeaderMap, addr: SocketAddr) -> ClientInfo {
    ClientInfo {
        device_info: headers
            .get(header::USER_AGENT)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string()),
        ip_address: Some(addr.ip().to_string()),
    }
}

pub async fn handler(
    State(ctx): State<Arc<Context>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<request::Payload>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return utils::validation::into_response(errors).into_response();
    }

    service(ctx, Role::User, client_info(&headers, addr), payload)
        .await
        .into_response()
}

pub async fn handler_with_role(
    State(ctx): State<Arc<Context>>,
    Path(role): Path<String>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<request::Payload>,
) -> impl IntoResponse {
    if let Err(errors) = payload.validate() {
        return utils::validation::into_response(errors).into_response();
    }

    // Only the two self-service roles can be requested; ADMIN comes solely
    // from the allowlist.
    let requested = match role.as_str() {
        "user" => Role::User,
        "interpreter" => Role::Interpreter,
        _ => return response::Error::UnknownRole.into_response(),
    };

    service(ctx, requested, client_info(&headers, addr), payload)
        .await
        .into_response()
}
