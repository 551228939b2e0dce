pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[validate(length(min = 10, max = 13, message = "Invalid phone number"))]
        pub phone: String,
        #[validate(length(equal = 6, message = "Invalid verification code"))]
        pub code: String,
    }
}

pub mod response {
    use crate::modules::account::repository::Account;
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        LoggedIn {
            account: Account,
            access_token: String,
            refresh_token: String,
            is_profile_complete: bool,
        },
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::LoggedIn {
                    account,
                    access_token,
                    refresh_token,
                    is_profile_complete,
                } => (
                    StatusCode::OK,
                    Json(json!({
                        "success": true,
                        "account": account,
                        "access_token": access_token,
                        "refresh_token": refresh_token,
                        "is_profile_complete": is_profile_complete,
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        CodeNotFoundOrExpired,
        InvalidCode,
        UnknownRole,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CodeNotFoundOrExpired => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Verification code not found or expired" })),
                )
                    .into_response(),
                Self::InvalidCode => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "error": "Invalid verification code" })),
                )
                    .into_response(),
                Self::UnknownRole => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": "Unknown role" })),
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
