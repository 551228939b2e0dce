pub mod challenge;
pub mod refresh_token;
