pub mod request {
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Deserialize, Validate)]
    pub struct Payload {
        #[validate(length(min = 10, max = 13, message = "Invalid phone number"))]
        pub phone: String,
    }
}

pub mod response {
    use axum::{extract::Json, http::StatusCode, response::IntoResponse};
    use serde_json::json;

    pub enum Success {
        CodeSent,
    }

    impl IntoResponse for Success {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::CodeSent => (
                    StatusCode::OK,
                    Json(json!({
                        "success": true,
                        "message": "Verification code sent",
                    })),
                )
                    .into_response(),
            }
        }
    }

    pub enum Error {
        DeliveryFailure,
        UnexpectedError,
    }

    impl IntoResponse for Error {
        fn into_response(self) -> axum::response::Response {
            match self {
                Self::DeliveryFailure => (
                    StatusCode::BAD_GATEWAY,
                    Json(json!({ "error": "Failed to deliver verification code" })),
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
