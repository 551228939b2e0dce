mod send;
mod verify;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .nest("/send", send::get_router())
        .nest("/verify", verify::get_router())
}
