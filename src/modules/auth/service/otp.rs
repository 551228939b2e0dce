use super::hash;
use crate::modules::auth::repository;
use crate::types::Context;
use crate::utils::sms;
use rand::Rng;
use std::sync::Arc;

#[derive(Debug)]
pub enum SendError {
    DeliveryFailure,
    UnexpectedError,
}

#[derive(Debug)]
pub enum VerifyError {
    NotFoundOrExpired,
    InvalidCode,
    UnexpectedError,
}

pub fn generate_code() -> String {
    rand::rng().random_range(100_000..1_000_000).to_string()
}

// Nothing is persisted unless the gateway accepts the send.
pub async fn request_code(ctx: Arc<Context>, phone: String) -> Result<(), SendError> {
    let code = generate_code();
    let code_hash = hash::hash_secret(&code).map_err(|_| SendError::UnexpectedError)?;

    sms::send(
        ctx.clone(),
        phone.clone(),
        sms::verification_message(&code, ctx.auth.otp_ttl_minutes),
    )
    .await
    .map_err(|_| SendError::DeliveryFailure)?;

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to begin transaction: {}", err);
        SendError::UnexpectedError
    })?;

    // A new request supersedes any outstanding challenge.
    repository::challenge::delete_by_phone(&mut *tx, phone.clone())
        .await
        .map_err(|_| SendError::UnexpectedError)?;

    repository::challenge::create(
        &mut *tx,
        repository::challenge::CreateChallengePayload {
            phone,
            code_hash,
            ttl_minutes: ctx.auth.otp_ttl_minutes,
        },
    )
    .await
    .map_err(|_| SendError::UnexpectedError)?;

    tx.commit().await.map_err(|err| {
        tracing::error!("Failed to commit transaction: {}", err);
        SendError::UnexpectedError
    })
}

// Consumption commits before any account mutation.
pub async fn verify_code(
    ctx: Arc<Context>,
    phone: String,
    code: String,
) -> Result<(), VerifyError> {
    let challenge = repository::challenge::find_live_by_phone(&ctx.db_conn.pool, phone)
        .await
        .map_err(|_| VerifyError::UnexpectedError)?
        .ok_or(VerifyError::NotFoundOrExpired)?;

    if !hash::verify_secret(&code, &challenge.code_hash) {
        return Err(VerifyError::InvalidCode);
    }

    // Only the caller whose delete removes the row proceeds.
    let consumed = repository::challenge::consume(&ctx.db_conn.pool, challenge.id)
        .await
        .map_err(|_| VerifyError::UnexpectedError)?;

    if !consumed {
        return Err(VerifyError::NotFoundOrExpired);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_six_digits() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn generated_code_verifies_against_its_hash() {
        let code = generate_code();
        let code_hash = hash::hash_secret(&code).unwrap();
        assert!(hash::verify_secret(&code, &code_hash));
    }
}
