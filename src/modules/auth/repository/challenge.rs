use chrono::NaiveDateTime;
use sqlx::PgExecutor;
use ulid::Ulid;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Challenge {
    pub id: String,
    pub phone: String,
    pub code_hash: String,
    pub purpose: String,
    pub expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

pub struct CreateChallengePayload {
    pub phone: String,
    pub code_hash: String,
    pub ttl_minutes: i64,
}

pub async fn create<'e, E: PgExecutor<'e>>(
    e: E,
    payload: CreateChallengePayload,
) -> Result<Challenge> {
    sqlx::query_as::<_, Challenge>(
        "
        INSERT INTO sms_challenges (id, phone, code_hash, purpose, expires_at)
        VALUES ($1, $2, $3, 'LOGIN', NOW() + make_interval(mins => $4))
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.phone)
    .bind(payload.code_hash)
    .bind(payload.ttl_minutes as i32)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating an sms challenge: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_live_by_phone<'e, E: PgExecutor<'e>>(
    e: E,
    phone: String,
) -> Result<Option<Challenge>> {
    sqlx::query_as::<_, Challenge>(
        "
        SELECT * FROM sms_challenges
        WHERE phone = $1 AND expires_at > NOW()
        ORDER BY created_at DESC
        LIMIT 1
        ",
    )
    .bind(phone)
    .fetch_optional(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred in find_live_by_phone: {}", err);
        Error::UnexpectedError
    })
}

pub async fn delete_by_phone<'e, E: PgExecutor<'e>>(e: E, phone: String) -> Result<()> {
    sqlx::query("DELETE FROM sms_challenges WHERE phone = $1")
        .bind(phone)
        .execute(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while deleting sms challenges by phone: {}",
                err
            );
            Error::UnexpectedError
        })
        .map(|_| ())
}

// Guarded delete: reports whether this caller actually removed the row.
// Concurrent verify attempts race on this; only the winner sees true.
pub async fn consume<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<bool> {
    sqlx::query("DELETE FROM sms_challenges WHERE id = $1")
        .bind(id.clone())
        .execute(e)
        .await
        .map(|result| result.rows_affected() == 1)
        .map_err(|err| {
            tracing::error!(
                "Error occurred while consuming sms challenge {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}
