use super::types::{request, response};
use crate::{modules::auth::service, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    service::token::rotate(ctx.clone(), payload.refresh_token)
        .await
        .map(response::Success::AccessToken)
        .map_err(|err| match err {
            service::token::Error::TokenInvalidOrExpired => response::Error::TokenInvalidOrExpired,
            service::token::Error::AccountNotFound => response::Error::AccountNotFound,
            service::token::Error::TokenInvalidated => response::Error::TokenInvalidated,
            service::token::Error::InvalidRefreshToken => response::Error::InvalidRefreshToken,
            service::token::Error::UnexpectedError => response::Error::UnexpectedError,
        })
}
