use super::service;
use crate::modules::account::repository::{self as account_repository, Account, Status};
use crate::types::Context;
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::RequestPartsExt;
use axum::{async_trait, Json};
use axum::{extract::Extension, http, http::request::Parts, response::Response};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

enum Error {
    InvalidToken,
    AccountNotFound,
    TokenInvalidated,
    AccountNotActive,
}

impl Error {
    fn message(&self) -> &'static str {
        match self {
            Error::InvalidToken => "Invalid or expired token",
            Error::AccountNotFound => "Account not found",
            Error::TokenInvalidated => "Token invalidated - logged in from another device",
            Error::AccountNotActive => "Account is not active",
        }
    }
}

fn get_token_from_header(header: String) -> Result<String, Error> {
    header
        .split(' ')
        .nth(1)
        .map(|token| token.to_string())
        .ok_or(Error::InvalidToken)
}

// Per-request validation: signature and expiry, account existence, the USER
// session-epoch gate, and account status, in that order.
async fn get_account_from_header(ctx: Arc<Context>, header: String) -> Result<Account, Error> {
    let token = get_token_from_header(header)?;

    let claims =
        service::jwt::verify_access(&ctx.jwt, &token).map_err(|_| Error::InvalidToken)?;

    let account = account_repository::find_by_id(&ctx.db_conn.pool, claims.sub)
        .await
        .map_err(|_| Error::AccountNotFound)?
        .ok_or(Error::AccountNotFound)?;

    if service::policy::for_role(account.role) == service::policy::DevicePolicy::SingleDevice
        && claims.session_epoch != account.session_epoch
    {
        return Err(Error::TokenInvalidated);
    }

    if account.status != Status::Active {
        return Err(Error::AccountNotActive);
    }

    Ok(account)
}

#[derive(Serialize, Clone)]
pub struct Auth {
    pub account: Account,
}

async fn get_account_from_request(ctx: Arc<Context>, parts: &mut Parts) -> Result<Account, Response> {
    let headers = parts.extract::<HeaderMap>().await.unwrap();

    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": Error::InvalidToken.message() })),
            )
                .into_response()
        })?;

    get_account_from_header(ctx, auth_header.to_string())
        .await
        .map_err(|err| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": err.message() })),
            )
                .into_response()
        })
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for Auth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Extension(ctx) = parts.extract::<Extension<Arc<Context>>>().await.unwrap();
        get_account_from_request(ctx, parts)
            .await
            .map(|account| Self { account })
    }
}

#[derive(Serialize, Clone)]
pub struct AdminAuth {
    pub account: Account,
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AdminAuth {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = Auth::from_request_parts(parts, state).await?;

        if !account_repository::is_admin(&auth.account) {
            return Err(
                (StatusCode::FORBIDDEN, Json(json!({ "error": "Forbidden" }))).into_response(),
            );
        }

        Ok(Self {
            account: auth.account,
        })
    }
}
