use chrono::NaiveDateTime;
use sqlx::PgExecutor;
use ulid::Ulid;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

// Rows are kept for audit; revocation flips is_revoked and never reverts.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct RefreshToken {
    pub id: String,
    pub account_id: String,
    pub token_hash: String,
    pub device_info: Option<String>,
    pub ip_address: Option<String>,
    pub is_revoked: bool,
    pub expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

pub struct CreateRefreshTokenPayload {
    pub account_id: String,
    pub token_hash: String,
    pub device_info: Option<String>,
    pub ip_address: Option<String>,
    pub ttl_days: i64,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateRefreshTokenPayload,
) -> Result<RefreshToken> {
    sqlx::query_as::<_, RefreshToken>(
        "
        INSERT INTO refresh_tokens (id, account_id, token_hash, device_info, ip_address, expires_at)
        VALUES ($1, $2, $3, $4, $5, NOW() + make_interval(days => $6))
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.account_id)
    .bind(payload.token_hash)
    .bind(payload.device_info)
    .bind(payload.ip_address)
    .bind(payload.ttl_days as i32)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while storing a refresh token: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_live_by_account_id<'e, E: PgExecutor<'e>>(
    e: E,
    account_id: String,
) -> Result<Vec<RefreshToken>> {
    sqlx::query_as::<_, RefreshToken>(
        "
        SELECT * FROM refresh_tokens
        WHERE account_id = $1 AND is_revoked = FALSE AND expires_at > NOW()
        ",
    )
    .bind(account_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred in find_live_by_account_id: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_unrevoked_by_account_id<'e, E: PgExecutor<'e>>(
    e: E,
    account_id: String,
) -> Result<Vec<RefreshToken>> {
    sqlx::query_as::<_, RefreshToken>(
        "SELECT * FROM refresh_tokens WHERE account_id = $1 AND is_revoked = FALSE",
    )
    .bind(account_id)
    .fetch_all(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred in find_unrevoked_by_account_id: {}", err);
        Error::UnexpectedError
    })
}

pub async fn revoke_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<()> {
    sqlx::query("UPDATE refresh_tokens SET is_revoked = TRUE WHERE id = $1")
        .bind(id.clone())
        .execute(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred while revoking refresh token {}: {}", id, err);
            Error::UnexpectedError
        })
        .map(|_| ())
}

pub async fn revoke_all_by_account_id<'e, E: PgExecutor<'e>>(e: E, account_id: String) -> Result<()> {
    sqlx::query("UPDATE refresh_tokens SET is_revoked = TRUE WHERE account_id = $1 AND is_revoked = FALSE")
        .bind(account_id.clone())
        .execute(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while revoking refresh tokens for account {}: {}",
                account_id,
                err
            );
            Error::UnexpectedError
        })
        .map(|_| ())
}
