use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::PgExecutor;
use ulid::Ulid;

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Role {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "INTERPRETER")]
    Interpreter,
    #[serde(rename = "ADMIN")]
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "USER"),
            Role::Interpreter => write!(f, "INTERPRETER"),
            Role::Admin => write!(f, "ADMIN"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, sqlx::Type)]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Status {
    #[serde(rename = "PENDING")]
    Pending,
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "SUSPENDED")]
    Suspended,
}

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct Account {
    pub id: String,
    pub phone: String,
    pub role: Role,
    pub status: Status,
    pub session_epoch: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Serialize, Deserialize, Clone, Debug, sqlx::FromRow)]
pub struct UserProfile {
    pub id: String,
    pub account_id: String,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub nationality: Option<String>,
    pub created_at: NaiveDateTime,
}

pub struct CreateAccountPayload {
    pub phone: String,
    pub role: Role,
}

pub async fn create<'e, E: PgExecutor<'e>>(e: E, payload: CreateAccountPayload) -> Result<Account> {
    sqlx::query_as::<_, Account>(
        "
        INSERT INTO accounts (id, phone, role, status, session_epoch)
        VALUES ($1, $2, $3, 'PENDING', 0)
        RETURNING *
        ",
    )
    .bind(Ulid::new().to_string())
    .bind(payload.phone)
    .bind(payload.role)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while creating an account: {}", err);
        Error::UnexpectedError
    })
}

pub async fn find_by_id<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Option<Account>> {
    sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = $1")
        .bind(id.clone())
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while fetching account with id {}: {}",
                id,
                err
            );
            Error::UnexpectedError
        })
}

pub async fn find_by_phone<'e, E: PgExecutor<'e>>(e: E, phone: String) -> Result<Option<Account>> {
    sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE phone = $1")
        .bind(phone)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred in find_by_phone: {}", err);
            Error::UnexpectedError
        })
}

// Promotion is one-way; nothing ever sets an ADMIN back to a lower role.
pub async fn promote_to_admin<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Account> {
    sqlx::query_as::<_, Account>(
        "UPDATE accounts SET role = 'ADMIN', updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while promoting account {} to admin: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn activate<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Account> {
    sqlx::query_as::<_, Account>(
        "UPDATE accounts SET status = 'ACTIVE', updated_at = NOW() WHERE id = $1 RETURNING *",
    )
    .bind(id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!("Error occurred while activating account {}: {}", id, err);
        Error::UnexpectedError
    })
}

pub async fn activate_and_bump_epoch<'e, E: PgExecutor<'e>>(e: E, id: String) -> Result<Account> {
    sqlx::query_as::<_, Account>(
        "
        UPDATE accounts
        SET status = 'ACTIVE', session_epoch = session_epoch + 1, updated_at = NOW()
        WHERE id = $1
        RETURNING *
        ",
    )
    .bind(id.clone())
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while activating account {} and bumping its session epoch: {}",
            id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn create_user_profile<'e, E: PgExecutor<'e>>(
    e: E,
    account_id: String,
    name: String,
) -> Result<UserProfile> {
    sqlx::query_as::<_, UserProfile>(
        "INSERT INTO user_profiles (id, account_id, name) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Ulid::new().to_string())
    .bind(account_id.clone())
    .bind(name)
    .fetch_one(e)
    .await
    .map_err(|err| {
        tracing::error!(
            "Error occurred while creating a profile for account {}: {}",
            account_id,
            err
        );
        Error::UnexpectedError
    })
}

pub async fn create_interpreter_profile<'e, E: PgExecutor<'e>>(
    e: E,
    account_id: String,
) -> Result<()> {
    sqlx::query("INSERT INTO interpreter_profiles (id, account_id) VALUES ($1, $2)")
        .bind(Ulid::new().to_string())
        .bind(account_id.clone())
        .execute(e)
        .await
        .map_err(|err| {
            tracing::error!(
                "Error occurred while creating an interpreter record for account {}: {}",
                account_id,
                err
            );
            Error::UnexpectedError
        })
        .map(|_| ())
}

pub async fn find_user_profile_by_account_id<'e, E: PgExecutor<'e>>(
    e: E,
    account_id: String,
) -> Result<Option<UserProfile>> {
    sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profiles WHERE account_id = $1")
        .bind(account_id)
        .fetch_optional(e)
        .await
        .map_err(|err| {
            tracing::error!("Error occurred in find_user_profile_by_account_id: {}", err);
            Error::UnexpectedError
        })
}

// A USER profile is complete once the name no longer equals the phone
// sentinel and both optional fields are filled. Other roles have no profile
// to complete.
pub fn is_profile_complete(account: &Account, profile: Option<&UserProfile>) -> bool {
    match account.role {
        Role::User => match profile {
            Some(profile) => {
                profile.name != account.phone
                    && profile.birth_date.is_some()
                    && profile.nationality.is_some()
            }
            None => false,
        },
        Role::Interpreter | Role::Admin => true,
    }
}

pub fn is_admin(account: &Account) -> bool {
    return account.role == Role::Admin;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account(role: Role, phone: &str) -> Account {
        Account {
            id: Ulid::new().to_string(),
            phone: phone.to_string(),
            role,
            status: Status::Active,
            session_epoch: 1,
            created_at: Utc::now().naive_utc(),
            updated_at: None,
        }
    }

    fn profile(account: &Account, name: &str) -> UserProfile {
        UserProfile {
            id: Ulid::new().to_string(),
            account_id: account.id.clone(),
            name: name.to_string(),
            birth_date: None,
            nationality: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn sentinel_profile_is_incomplete() {
        let account = account(Role::User, "01012345678");
        let profile = profile(&account, "01012345678");
        assert!(!is_profile_complete(&account, Some(&profile)));
    }

    #[test]
    fn filled_profile_is_complete() {
        let account = account(Role::User, "01012345678");
        let mut profile = profile(&account, "Jane");
        profile.birth_date = NaiveDate::from_ymd_opt(1990, 4, 2);
        profile.nationality = Some("KR".to_string());
        assert!(is_profile_complete(&account, Some(&profile)));
    }

    #[test]
    fn renamed_profile_without_details_is_incomplete() {
        let account = account(Role::User, "01012345678");
        let profile = profile(&account, "Jane");
        assert!(!is_profile_complete(&account, Some(&profile)));
    }

    #[test]
    fn missing_profile_is_incomplete_for_user() {
        let account = account(Role::User, "01012345678");
        assert!(!is_profile_complete(&account, None));
    }

    #[test]
    fn only_admin_accounts_are_admin() {
        assert!(is_admin(&account(Role::Admin, "01043879779")));
        assert!(!is_admin(&account(Role::User, "01012345678")));
        assert!(!is_admin(&account(Role::Interpreter, "01012345678")));
    }

    #[test]
    fn admin_and_interpreter_are_always_complete() {
        assert!(is_profile_complete(
            &account(Role::Admin, "01043879779"),
            None
        ));
        assert!(is_profile_complete(
            &account(Role::Interpreter, "01012345678"),
            None
        ));
    }
}
