use super::{repository, service};
use crate::modules::account::repository::{self as account_repository, Account, Role};
use crate::types::{AppContext, AppEnvironment, AuthContext, Context, JwtContext, SmsContext};
use crate::utils::database;
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;

// These tests run against a real database and no-op when DATABASE_URL is
// unset.
async fn test_context(admin_phones: HashSet<String>) -> Option<Arc<Context>> {
    let url = std::env::var("DATABASE_URL").ok()?;

    let db_conn = database::connect(&url).await;
    database::migrate(db_conn.clone()).await;

    Some(Arc::new(Context {
        app: AppContext {
            host: "127.0.0.1".to_string(),
            environment: AppEnvironment::Development,
            port: 0,
            url: "http://127.0.0.1:0".to_string(),
        },
        db_conn,
        jwt: JwtContext {
            access_secret: "test-access-secret-test-access-secret".to_string(),
            refresh_secret: "test-refresh-secret-test-refresh-secret".to_string(),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
        },
        sms: SmsContext {
            api_key: String::new(),
            user_id: String::new(),
            sender: String::new(),
            api_endpoint: String::new(),
        },
        auth: AuthContext {
            admin_phones,
            otp_ttl_minutes: 3,
        },
    }))
}

fn random_phone() -> String {
    format!("010{:08}", rand::rng().random_range(0..100_000_000))
}

async fn login(
    ctx: &Arc<Context>,
    phone: String,
    role: Role,
) -> (Account, service::token::TokenPair) {
    let mut tx = ctx.db_conn.pool.begin().await.unwrap();

    let account = service::role::resolve_account(&mut tx, ctx.clone(), phone, role)
        .await
        .unwrap();
    let account = service::token::login(&mut tx, &account).await.unwrap();
    let pair = service::token::issue_pair(
        &mut *tx,
        &ctx.jwt,
        &account,
        service::token::ClientInfo::default(),
    )
    .await
    .unwrap();

    tx.commit().await.unwrap();

    (account, pair)
}

#[tokio::test]
async fn a_code_is_consumed_exactly_once() {
    let Some(ctx) = test_context(HashSet::new()).await else {
        return;
    };
    let phone = random_phone();

    let code = service::otp::generate_code();
    let code_hash = service::hash::hash_secret(&code).unwrap();
    repository::challenge::create(
        &ctx.db_conn.pool,
        repository::challenge::CreateChallengePayload {
            phone: phone.clone(),
            code_hash,
            ttl_minutes: 3,
        },
    )
    .await
    .unwrap();

    assert!(service::otp::verify_code(ctx.clone(), phone.clone(), code.clone())
        .await
        .is_ok());
    assert!(matches!(
        service::otp::verify_code(ctx, phone, code).await,
        Err(service::otp::VerifyError::NotFoundOrExpired)
    ));
}

#[tokio::test]
async fn a_second_user_login_invalidates_the_first_device() {
    let Some(ctx) = test_context(HashSet::new()).await else {
        return;
    };
    let phone = random_phone();

    let (first_account, first_pair) = login(&ctx, phone.clone(), Role::User).await;
    let (second_account, second_pair) = login(&ctx, phone, Role::User).await;

    assert_eq!(
        second_account.session_epoch,
        first_account.session_epoch + 1
    );
    assert!(matches!(
        service::token::rotate(ctx.clone(), first_pair.refresh_token).await,
        Err(service::token::Error::TokenInvalidated)
    ));
    assert!(service::token::rotate(ctx, second_pair.refresh_token)
        .await
        .is_ok());
}

#[tokio::test]
async fn interpreter_sessions_survive_a_new_login() {
    let Some(ctx) = test_context(HashSet::new()).await else {
        return;
    };
    let phone = random_phone();

    let (first_account, first_pair) = login(&ctx, phone.clone(), Role::Interpreter).await;
    let (second_account, second_pair) = login(&ctx, phone, Role::Interpreter).await;

    assert_eq!(second_account.session_epoch, first_account.session_epoch);
    assert!(service::token::rotate(ctx.clone(), first_pair.refresh_token)
        .await
        .is_ok());
    assert!(service::token::rotate(ctx, second_pair.refresh_token)
        .await
        .is_ok());
}

#[tokio::test]
async fn an_allowlisted_phone_logs_in_as_admin_on_every_device() {
    let phone = random_phone();
    let Some(ctx) = test_context([phone.clone()].into_iter().collect()).await else {
        return;
    };

    let (account, first_pair) = login(&ctx, phone.clone(), Role::User).await;

    assert_eq!(account.role, Role::Admin);
    assert!(account_repository::is_profile_complete(&account, None));

    login(&ctx, phone, Role::User).await;

    assert!(service::token::rotate(ctx, first_pair.refresh_token)
        .await
        .is_ok());
}

#[tokio::test]
async fn logout_is_idempotent() {
    let Some(ctx) = test_context(HashSet::new()).await else {
        return;
    };
    let phone = random_phone();

    let (_, pair) = login(&ctx, phone, Role::User).await;

    assert!(service::token::revoke(ctx.clone(), pair.refresh_token.clone())
        .await
        .is_ok());
    assert!(service::token::revoke(ctx.clone(), pair.refresh_token.clone())
        .await
        .is_ok());
    assert!(matches!(
        service::token::rotate(ctx, pair.refresh_token).await,
        Err(service::token::Error::InvalidRefreshToken)
    ));
}
