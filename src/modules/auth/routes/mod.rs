mod logout;
mod refresh;
mod sms;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .nest("/sms", sms::get_router())
        .nest("/refresh", refresh::get_router())
        .nest("/logout", logout::get_router())
}
