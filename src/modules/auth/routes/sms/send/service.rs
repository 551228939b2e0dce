use super::types::{request, response};
use crate::{modules::auth::service, types::Context};
use std::sync::Arc;

pub async fn service(ctx: Arc<Context>, payload: request::Payload) -> response::Response {
    service::otp::request_code(ctx.clone(), payload.phone)
        .await
        .map(|_| response::Success::CodeSent)
        .map_err(|err| match err {
            service::otp::SendError::DeliveryFailure => response::Error::DeliveryFailure,
            service::otp::SendError::UnexpectedError => response::Error::UnexpectedError,
        })
}
