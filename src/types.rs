pub use crate::utils::database;
use async_trait::async_trait;
use std::collections::HashSet;
use std::env;

#[derive(Clone)]
pub enum AppEnvironment {
    Production,
    Development,
}

impl AppEnvironment {
    pub fn from(raw_environment: String) -> Self {
        match raw_environment.as_ref() {
            "production" => Self::Production,
            _ => Self::Development,
        }
    }
}

#[derive(Clone)]
pub struct AppContext {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct JwtContext {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_days: i64,
}

#[derive(Clone)]
pub struct SmsContext {
    pub api_key: String,
    pub user_id: String,
    pub sender: String,
    pub api_endpoint: String,
}

#[derive(Clone)]
pub struct AuthContext {
    pub admin_phones: HashSet<String>,
    pub otp_ttl_minutes: i64,
}

#[derive(Clone)]
pub struct Context {
    pub app: AppContext,
    pub db_conn: database::DatabaseConnection,
    pub jwt: JwtContext,
    pub sms: SmsContext,
    pub auth: AuthContext,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub environment: AppEnvironment,
    pub port: u32,
    pub url: String,
}

#[derive(Clone)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl_minutes: i64,
    pub refresh_ttl_days: i64,
}

const MIN_JWT_SECRET_LENGTH: usize = 32;

impl JwtConfig {
    // Secrets must differ and each be long enough. Checked once at startup.
    pub fn validate(&self) -> Result<(), String> {
        if self.access_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(format!(
                "JWT_ACCESS_SECRET must be at least {} characters",
                MIN_JWT_SECRET_LENGTH
            ));
        }
        if self.refresh_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(format!(
                "JWT_REFRESH_SECRET must be at least {} characters",
                MIN_JWT_SECRET_LENGTH
            ));
        }
        if self.access_secret == self.refresh_secret {
            return Err("JWT_ACCESS_SECRET and JWT_REFRESH_SECRET must differ".to_string());
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct SmsConfig {
    pub api_key: String,
    pub user_id: String,
    pub sender: String,
    pub api_endpoint: String,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub admin_phones: String,
    pub otp_ttl_minutes: i64,
}

pub fn parse_admin_phones(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|phone| phone.trim().to_string())
        .filter(|phone| !phone.is_empty())
        .collect()
}

#[derive(Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub app: AppConfig,
    pub jwt: JwtConfig,
    pub sms: SmsConfig,
    pub auth: AuthConfig,
}

impl Default for Config {
    fn default() -> Self {
        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL not set");
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let environment = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u32>()
            .expect("Invalid PORT number");
        let url = env::var("URL").unwrap_or_else(|_| format!("http://{}:{}", host, port));
        let jwt_access_secret = env::var("JWT_ACCESS_SECRET").expect("JWT_ACCESS_SECRET not set");
        let jwt_refresh_secret =
            env::var("JWT_REFRESH_SECRET").expect("JWT_REFRESH_SECRET not set");
        let jwt_access_ttl_minutes = env::var("JWT_ACCESS_TTL_MINUTES")
            .unwrap_or_else(|_| "15".to_string())
            .parse::<i64>()
            .expect("Invalid JWT_ACCESS_TTL_MINUTES");
        let jwt_refresh_ttl_days = env::var("JWT_REFRESH_TTL_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse::<i64>()
            .expect("Invalid JWT_REFRESH_TTL_DAYS");
        let otp_ttl_minutes = env::var("OTP_TTL_MINUTES")
            .unwrap_or_else(|_| "3".to_string())
            .parse::<i64>()
            .expect("Invalid OTP_TTL_MINUTES");
        let admin_phones = env::var("ADMIN_PHONES").unwrap_or_default();
        let sms_api_key = env::var("SMS_API_KEY").expect("SMS_API_KEY not set");
        let sms_user_id = env::var("SMS_USER_ID").expect("SMS_USER_ID not set");
        let sms_sender = env::var("SMS_SENDER").expect("SMS_SENDER not set");
        let sms_api_endpoint = env::var("SMS_API_ENDPOINT").expect("SMS_API_ENDPOINT not set");

        return Self {
            database: DatabaseConfig { url: database_url },
            app: AppConfig {
                host,
                environment: AppEnvironment::from(environment),
                port,
                url,
            },
            jwt: JwtConfig {
                access_secret: jwt_access_secret,
                refresh_secret: jwt_refresh_secret,
                access_ttl_minutes: jwt_access_ttl_minutes,
                refresh_ttl_days: jwt_refresh_ttl_days,
            },
            sms: SmsConfig {
                api_key: sms_api_key,
                user_id: sms_user_id,
                sender: sms_sender,
                api_endpoint: sms_api_endpoint,
            },
            auth: AuthConfig {
                admin_phones,
                otp_ttl_minutes,
            },
        };
    }
}

#[async_trait]
pub trait ToContext {
    async fn to_context(self) -> Context;
}

#[async_trait]
impl ToContext for Config {
    async fn to_context(self) -> Context {
        self.jwt
            .validate()
            .unwrap_or_else(|err| panic!("Invalid JWT configuration: {}", err));

        let db_conn = database::connect(self.database.url.as_str()).await;
        database::migrate(db_conn.clone()).await;

        Context {
            app: AppContext {
                host: self.app.host,
                environment: self.app.environment,
                port: self.app.port,
                url: self.app.url,
            },
            db_conn,
            jwt: JwtContext {
                access_secret: self.jwt.access_secret,
                refresh_secret: self.jwt.refresh_secret,
                access_ttl_minutes: self.jwt.access_ttl_minutes,
                refresh_ttl_days: self.jwt.refresh_ttl_days,
            },
            sms: SmsContext {
                api_key: self.sms.api_key,
                user_id: self.sms.user_id,
                sender: self.sms.sender,
                api_endpoint: self.sms.api_endpoint,
            },
            auth: AuthContext {
                admin_phones: parse_admin_phones(&self.auth.admin_phones),
                otp_ttl_minutes: self.auth.otp_ttl_minutes,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jwt_config(access: &str, refresh: &str) -> JwtConfig {
        JwtConfig {
            access_secret: access.to_string(),
            refresh_secret: refresh.to_string(),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
        }
    }

    #[test]
    fn accepts_distinct_long_secrets() {
        let config = jwt_config(
            "0123456789abcdef0123456789abcdef",
            "fedcba9876543210fedcba9876543210",
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_short_access_secret() {
        let config = jwt_config("too-short", "fedcba9876543210fedcba9876543210");
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_short_refresh_secret() {
        let config = jwt_config("0123456789abcdef0123456789abcdef", "too-short");
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_identical_secrets() {
        let config = jwt_config(
            "0123456789abcdef0123456789abcdef",
            "0123456789abcdef0123456789abcdef",
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn parses_admin_phone_list() {
        let phones = parse_admin_phones("01043879779, 01011112222 ,");
        assert_eq!(phones.len(), 2);
        assert!(phones.contains("01043879779"));
        assert!(phones.contains("01011112222"));
    }

    #[test]
    fn empty_admin_phone_list_is_empty() {
        assert!(parse_admin_phones("").is_empty());
    }
}
