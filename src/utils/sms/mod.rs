use crate::types;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug)]
pub enum Error {
    NotSent,
}

type Result<T> = std::result::Result<T, Error>;

#[derive(Deserialize, Debug)]
struct GatewayResponse {
    result_code: String,
    message: String,
}

// Gateway expects local-format numbers: +82 prefixes become a leading 0,
// dashes are stripped.
pub fn normalize_phone(phone: &str) -> String {
    let phone = phone.replace('-', "");
    match phone.strip_prefix("+82") {
        Some(rest) => format!("0{}", rest),
        None => phone,
    }
}

pub fn verification_message(code: &str, ttl_minutes: i64) -> String {
    format!(
        "[LingoHub] Your verification code is {}. It expires in {} minutes.",
        code, ttl_minutes
    )
}

pub async fn send(ctx: Arc<types::Context>, phone: String, message: String) -> Result<()> {
    let receiver = normalize_phone(&phone);

    let params = [
        ("key", ctx.sms.api_key.clone()),
        ("user_id", ctx.sms.user_id.clone()),
        ("sender", ctx.sms.sender.clone()),
        ("receiver", receiver),
        ("msg", message),
        ("msg_type", "SMS".to_string()),
    ];

    let res = reqwest::Client::new()
        .post(ctx.sms.api_endpoint.clone())
        .form(&params)
        .send()
        .await
        .map_err(|err| {
            tracing::error!("Failed to send verification sms: {}", err);
            Error::NotSent
        })?;

    let body = res.text().await.map_err(|err| {
        tracing::error!("Failed to get sms gateway response body: {}", err);
        Error::NotSent
    })?;

    let parsed = serde_json::from_str::<GatewayResponse>(&body).map_err(|err| {
        tracing::error!("Failed to deserialize sms gateway response: {}", err);
        Error::NotSent
    })?;

    if parsed.result_code != "1" {
        tracing::error!("Sms gateway rejected the message: {}", parsed.message);
        return Err(Error::NotSent);
    }

    tracing::debug!("Successfully sent verification sms");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_country_code_prefix() {
        assert_eq!(normalize_phone("+821012345678"), "01012345678");
    }

    #[test]
    fn strips_dashes() {
        assert_eq!(normalize_phone("010-1234-5678"), "01012345678");
    }

    #[test]
    fn leaves_local_numbers_untouched() {
        assert_eq!(normalize_phone("01012345678"), "01012345678");
    }

    #[test]
    fn message_carries_the_configured_ttl() {
        let message = verification_message("123456", 5);
        assert!(message.contains("123456"));
        assert!(message.contains("5 minutes"));
    }
}
