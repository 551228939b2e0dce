use super::types::{request, response};
use crate::modules::account::repository as account_repository;
use crate::modules::account::repository::Role;
use crate::modules::auth::service;
use crate::modules::auth::service::token::ClientInfo;
use crate::types::Context;
use std::sync::Arc;

pub async fn service(
    ctx: Arc<Context>,
    requested_role: Role,
    client: ClientInfo,
    payload: request::Payload,
) -> response::Response {
    service::otp::verify_code(ctx.clone(), payload.phone.clone(), payload.code.clone())
        .await
        .map_err(|err| match err {
            service::otp::VerifyError::NotFoundOrExpired => response::Error::CodeNotFoundOrExpired,
            service::otp::VerifyError::InvalidCode => response::Error::InvalidCode,
            service::otp::VerifyError::UnexpectedError => response::Error::UnexpectedError,
        })?;

    let mut tx = ctx.db_conn.pool.begin().await.map_err(|err| {
        tracing::error!("Failed to begin transaction: {}", err);
        response::Error::UnexpectedError
    })?;

    let account = service::role::resolve_account(
        &mut tx,
        ctx.clone(),
        payload.phone.clone(),
        requested_role,
    )
    .await
    .map_err(|_| response::Error::UnexpectedError)?;

    let account = service::token::login(&mut tx, &account)
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    let token_pair = service::token::issue_pair(&mut *tx, &ctx.jwt, &account, client)
        .await
        .map_err(|_| response::Error::UnexpectedError)?;

    let profile =
        account_repository::find_user_profile_by_account_id(&mut *tx, account.id.clone())
            .await
            .map_err(|_| response::Error::UnexpectedError)?;

    let is_profile_complete = account_repository::is_profile_complete(&account, profile.as_ref());

    tx.commit()
        .await
        .map(|_| response::Success::LoggedIn {
            account,
            access_token: token_pair.access_token,
            refresh_token: token_pair.refresh_token,
            is_profile_complete,
        })
        .map_err(|err| {
            tracing::error!("Failed to commit transaction: {}", err);
            response::Error::UnexpectedError
        })
}
