use super::{hash, jwt, policy};
use crate::modules::account::repository::{self as account_repository, Account};
use crate::modules::auth::repository;
use crate::types::{Context, JwtContext};
use sqlx::{PgExecutor, Postgres, Transaction};
use std::sync::Arc;

#[derive(Debug)]
pub enum Error {
    TokenInvalidOrExpired,
    AccountNotFound,
    TokenInvalidated,
    InvalidRefreshToken,
    UnexpectedError,
}

type Result<T> = std::result::Result<T, Error>;

pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Clone, Debug, Default)]
pub struct ClientInfo {
    pub device_info: Option<String>,
    pub ip_address: Option<String>,
}

// The stored copy of the refresh token is a salted hash.
pub async fn issue_pair<'e, E: PgExecutor<'e>>(
    e: E,
    jwt_ctx: &JwtContext,
    account: &Account,
    client: ClientInfo,
) -> Result<TokenPair> {
    let access_token = jwt::sign_access(jwt_ctx, account).map_err(|_| Error::UnexpectedError)?;
    let refresh_token = jwt::sign_refresh(jwt_ctx, account).map_err(|_| Error::UnexpectedError)?;

    let token_hash = hash::hash_secret(&refresh_token).map_err(|_| Error::UnexpectedError)?;

    repository::refresh_token::create(
        e,
        repository::refresh_token::CreateRefreshTokenPayload {
            account_id: account.id.clone(),
            token_hash,
            device_info: client.device_info,
            ip_address: client.ip_address,
            ttl_days: jwt_ctx.refresh_ttl_days,
        },
    )
    .await
    .map_err(|_| Error::UnexpectedError)?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

// Activation, the epoch bump and the bulk revoke land in the caller's
// transaction.
pub async fn login(tx: &mut Transaction<'_, Postgres>, account: &Account) -> Result<Account> {
    match policy::for_role(account.role) {
        policy::DevicePolicy::SingleDevice => {
            let updated = account_repository::activate_and_bump_epoch(&mut **tx, account.id.clone())
                .await
                .map_err(|_| Error::UnexpectedError)?;

            repository::refresh_token::revoke_all_by_account_id(&mut **tx, account.id.clone())
                .await
                .map_err(|_| Error::UnexpectedError)?;

            Ok(updated)
        }
        policy::DevicePolicy::MultiDevice => {
            account_repository::activate(&mut **tx, account.id.clone())
                .await
                .map_err(|_| Error::UnexpectedError)
        }
    }
}

// Mints a fresh access token; the refresh token is left as issued.
pub async fn rotate(ctx: Arc<Context>, refresh_token: String) -> Result<String> {
    let claims =
        jwt::verify_refresh(&ctx.jwt, &refresh_token).map_err(|_| Error::TokenInvalidOrExpired)?;

    let account = account_repository::find_by_id(&ctx.db_conn.pool, claims.sub)
        .await
        .map_err(|_| Error::UnexpectedError)?
        .ok_or(Error::AccountNotFound)?;

    if policy::for_role(account.role) == policy::DevicePolicy::SingleDevice
        && claims.session_epoch != account.session_epoch
    {
        return Err(Error::TokenInvalidated);
    }

    let stored_tokens =
        repository::refresh_token::find_live_by_account_id(&ctx.db_conn.pool, account.id.clone())
            .await
            .map_err(|_| Error::UnexpectedError)?;

    // Salted hashes, so scan the account's live sessions.
    let matched = stored_tokens
        .iter()
        .any(|stored| hash::verify_secret(&refresh_token, &stored.token_hash));

    if !matched {
        return Err(Error::InvalidRefreshToken);
    }

    jwt::sign_access(&ctx.jwt, &account).map_err(|_| Error::UnexpectedError)
}

// Logout never reveals whether the token was still live.
pub async fn revoke(ctx: Arc<Context>, refresh_token: String) -> Result<()> {
    let claims =
        jwt::verify_refresh(&ctx.jwt, &refresh_token).map_err(|_| Error::TokenInvalidOrExpired)?;

    let stored_tokens =
        repository::refresh_token::find_unrevoked_by_account_id(&ctx.db_conn.pool, claims.sub)
            .await
            .map_err(|_| Error::UnexpectedError)?;

    let matched = stored_tokens
        .iter()
        .find(|stored| hash::verify_secret(&refresh_token, &stored.token_hash));

    if let Some(stored) = matched {
        repository::refresh_token::revoke_by_id(&ctx.db_conn.pool, stored.id.clone())
            .await
            .map_err(|_| Error::UnexpectedError)?;
    }

    Ok(())
}
