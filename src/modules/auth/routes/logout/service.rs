use super::types::{request, response};
use crate::{modules::auth::service, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    service::token::revoke(ctx.clone(), payload.refresh_token)
        .await
        .map(|_| response::Success::LoggedOut)
        .map_err(|err| match err {
            service::token::Error::TokenInvalidOrExpired => response::Error::TokenInvalidOrExpired,
            _ => response::Error::UnexpectedError,
        })
}
