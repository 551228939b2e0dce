pub mod request {
    use serde::Deserialize;

    #[derive(Deserialize)]
    pub struct Payload {
        pub refresh_token: String,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        AccessToken(String),
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::AccessToken(access_token) => (
                    StatusCode::OK,
                    Json(json!({ "access_token": access_token })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        TokenInvalidOrExpired,
        AccountNotFound,
        TokenInvalidated,
        InvalidRefreshToken,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::TokenInvalidOrExpired => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Invalid or expired refresh token" })),
                )
                    .into_response(),
                Self::AccountNotFound => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Account not found" })),
                )
                    .into_response(),
                Self::TokenInvalidated => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Token invalidated - logged in from another device" })),
                )
                    .into_response(),
                Self::InvalidRefreshToken => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Invalid refresh token" })),
                )
                    .into_response(),
                Self::UnexpectedError => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Sorry an error occurred" })),
                )
                    .into_response(),
            }
        }
    }

    pub type Response = Result<Success, Error>;
}
