use crate::modules::account::repository::{Account, Role};
use crate::types::JwtContext;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum Error {
    SigningFailed,
    InvalidOrExpired,
}

type Result<T> = std::result::Result<T, Error>;

// Access and refresh tokens share a claim set but are signed with distinct
// secrets, so one kind never verifies as the other.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub session_epoch: i32,
    pub iat: i64,
    pub exp: i64,
}

fn sign(secret: &str, account: &Account, ttl_seconds: i64) -> Result<String> {
    let now = chrono::Utc::now().timestamp();

    let claims = Claims {
        sub: account.id.clone(),
        role: account.role,
        session_epoch: account.session_epoch,
        iat: now,
        exp: now + ttl_seconds,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| {
        tracing::error!("Failed to sign token: {}", err);
        Error::SigningFailed
    })
}

fn verify(secret: &str, token: &str) -> Result<Claims> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| Error::InvalidOrExpired)
}

pub fn sign_access(jwt: &JwtContext, account: &Account) -> Result<String> {
    sign(&jwt.access_secret, account, jwt.access_ttl_minutes * 60)
}

pub fn sign_refresh(jwt: &JwtContext, account: &Account) -> Result<String> {
    sign(&jwt.refresh_secret, account, jwt.refresh_ttl_days * 24 * 60 * 60)
}

pub fn verify_access(jwt: &JwtContext, token: &str) -> Result<Claims> {
    verify(&jwt.access_secret, token)
}

pub fn verify_refresh(jwt: &JwtContext, token: &str) -> Result<Claims> {
    verify(&jwt.refresh_secret, token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::account::repository::Status;
    use ulid::Ulid;

    fn jwt_context() -> JwtContext {
        JwtContext {
            access_secret: "access-secret-access-secret-access-secret".to_string(),
            refresh_secret: "refresh-secret-refresh-secret-refresh-secret".to_string(),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
        }
    }

    fn account(role: Role, session_epoch: i32) -> Account {
        Account {
            id: Ulid::new().to_string(),
            phone: "01012345678".to_string(),
            role,
            status: Status::Active,
            session_epoch,
            created_at: chrono::Utc::now().naive_utc(),
            updated_at: None,
        }
    }

    #[test]
    fn access_token_round_trips() {
        let jwt = jwt_context();
        let account = account(Role::User, 3);

        let token = sign_access(&jwt, &account).unwrap();
        let claims = verify_access(&jwt, &token).unwrap();

        assert_eq!(claims.sub, account.id);
        assert_eq!(claims.role, Role::User);
        assert_eq!(claims.session_epoch, 3);
    }

    #[test]
    fn refresh_token_round_trips() {
        let jwt = jwt_context();
        let account = account(Role::Interpreter, 0);

        let token = sign_refresh(&jwt, &account).unwrap();
        let claims = verify_refresh(&jwt, &token).unwrap();

        assert_eq!(claims.sub, account.id);
        assert_eq!(claims.role, Role::Interpreter);
    }

    #[test]
    fn token_kinds_do_not_cross_verify() {
        let jwt = jwt_context();
        let account = account(Role::User, 1);

        let access = sign_access(&jwt, &account).unwrap();
        let refresh = sign_refresh(&jwt, &account).unwrap();

        assert!(verify_refresh(&jwt, &access).is_err());
        assert!(verify_access(&jwt, &refresh).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let jwt = jwt_context();
        let account = account(Role::User, 1);

        let mut token = sign_access(&jwt, &account).unwrap();
        token.pop();
        token.push('x');

        assert!(verify_access(&jwt, &token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let jwt = jwt_context();
        let account = account(Role::User, 1);

        // Past the default 60s validation leeway.
        let token = sign(&jwt.access_secret, &account, -120).unwrap();

        assert!(verify_access(&jwt, &token).is_err());
    }
}
