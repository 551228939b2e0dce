use crate::modules::account::repository::{self as account_repository, Account, Role};
use crate::types::Context;
use sqlx::{Postgres, Transaction};
use std::collections::HashSet;
use std::sync::Arc;

#[derive(Debug)]
pub enum Error {
    UnexpectedError,
}

// The allowlist always wins: an allowlisted phone is ADMIN no matter what
// role the client asked for.
pub fn resolve(requested: Role, phone: &str, admin_phones: &HashSet<String>) -> Role {
    if admin_phones.contains(phone) {
        Role::Admin
    } else {
        requested
    }
}

// Materializes the resolved role: first login creates the account (plus the
// minimal profile row its role calls for), later logins of an allowlisted
// phone promote in place.
pub async fn resolve_account(
    tx: &mut Transaction<'_, Postgres>,
    ctx: Arc<Context>,
    phone: String,
    requested: Role,
) -> Result<Account, Error> {
    let final_role = resolve(requested, &phone, &ctx.auth.admin_phones);

    let existing = account_repository::find_by_phone(&mut **tx, phone.clone())
        .await
        .map_err(|_| Error::UnexpectedError)?;

    match existing {
        None => {
            let account = account_repository::create(
                &mut **tx,
                account_repository::CreateAccountPayload {
                    phone: phone.clone(),
                    role: final_role,
                },
            )
            .await
            .map_err(|_| Error::UnexpectedError)?;

            match final_role {
                Role::User => {
                    // Name defaults to the phone string until the profile is
                    // filled in; completeness checks key off that sentinel.
                    account_repository::create_user_profile(
                        &mut **tx,
                        account.id.clone(),
                        phone,
                    )
                    .await
                    .map_err(|_| Error::UnexpectedError)?;
                }
                Role::Interpreter => {
                    account_repository::create_interpreter_profile(&mut **tx, account.id.clone())
                        .await
                        .map_err(|_| Error::UnexpectedError)?;
                }
                Role::Admin => {}
            }

            Ok(account)
        }
        Some(account) => {
            if final_role == Role::Admin && account.role != Role::Admin {
                return account_repository::promote_to_admin(&mut **tx, account.id.clone())
                    .await
                    .map_err(|_| Error::UnexpectedError);
            }

            Ok(account)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowlist() -> HashSet<String> {
        ["01043879779".to_string()].into_iter().collect()
    }

    #[test]
    fn allowlisted_phone_always_resolves_to_admin() {
        let admin_phones = allowlist();
        assert_eq!(
            resolve(Role::User, "01043879779", &admin_phones),
            Role::Admin
        );
        assert_eq!(
            resolve(Role::Interpreter, "01043879779", &admin_phones),
            Role::Admin
        );
    }

    #[test]
    fn other_phones_keep_the_requested_role() {
        let admin_phones = allowlist();
        assert_eq!(resolve(Role::User, "01012345678", &admin_phones), Role::User);
        assert_eq!(
            resolve(Role::Interpreter, "01012345678", &admin_phones),
            Role::Interpreter
        );
    }

    #[test]
    fn empty_allowlist_never_promotes() {
        let admin_phones = HashSet::new();
        assert_eq!(resolve(Role::User, "01043879779", &admin_phones), Role::User);
    }
}
