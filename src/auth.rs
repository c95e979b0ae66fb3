//! Account signup and login against the record store
//!
//! Credentials are stored and compared as given.

use crate::config::SurveyConfig;
use crate::state::{Session, User};
use crate::store::StoreClientTrait;
use anyhow::Result;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("username is required")]
    EmptyUsername,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("username {0:?} already exists")]
    UsernameTaken(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("not logged in")]
    NotLoggedIn,
}

/// Register a new account
pub async fn signup<S: StoreClientTrait + ?Sized>(
    store: &mut S,
    username: &str,
    password: &str,
    confirm_password: &str,
) -> Result<User> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AuthError::EmptyUsername.into());
    }
    if password != confirm_password {
        return Err(AuthError::PasswordMismatch.into());
    }
    let users = store.list_users().await?;
    if users.iter().any(|u| u.username == username) {
        return Err(AuthError::UsernameTaken(username.to_string()).into());
    }

    let user = User {
        username: username.to_string(),
        password: password.to_string(),
    };
    store.create_user(user.clone()).await?;
    tracing::info!(username, "account created");
    Ok(user)
}

/// Check credentials and open a session
pub async fn login<S: StoreClientTrait + ?Sized>(
    store: &mut S,
    username: &str,
    password: &str,
) -> Result<Session> {
    let username = username.trim();
    let users = store.list_users().await?;
    match users.iter().find(|u| u.username == username) {
        Some(user) if user.password == password => {
            tracing::info!(username, "logged in");
            Ok(Session {
                username: user.username.clone(),
            })
        }
        _ => {
            tracing::warn!(username, "login rejected");
            Err(AuthError::InvalidCredentials.into())
        }
    }
}

/// Forget the current session, returning who was logged in
pub fn logout(config: &mut SurveyConfig) -> Option<Session> {
    let session = config.session.take();
    if let Some(session) = &session {
        tracing::info!(username = %session.username, "logged out");
    }
    session
}

/// The current session, or [`AuthError::NotLoggedIn`]
pub fn require_session(config: &SurveyConfig) -> Result<&Session, AuthError> {
    config.session.as_ref().ok_or(AuthError::NotLoggedIn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MockStoreClientTrait;

    fn existing(username: &str, password: &str) -> Vec<User> {
        vec![User {
            username: username.to_string(),
            password: password.to_string(),
        }]
    }

    fn auth_error(err: &anyhow::Error) -> Option<&AuthError> {
        err.downcast_ref::<AuthError>()
    }

    mod signup {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_signup_creates_user() {
            let mut store = MockStoreClientTrait::new();
            store.expect_list_users().returning(|| Ok(Vec::new()));
            store
                .expect_create_user()
                .withf(|user| user.username == "dev" && user.password == "pw")
                .times(1)
                .returning(|_| Ok(()));

            let user = signup(&mut store, " dev ", "pw", "pw").await.unwrap();
            assert_eq!(user.username, "dev");
        }

        #[tokio::test]
        async fn test_signup_rejects_mismatched_passwords() {
            let mut store = MockStoreClientTrait::new();
            store.expect_create_user().never();

            let err = signup(&mut store, "dev", "pw", "wp").await.unwrap_err();
            assert_eq!(auth_error(&err), Some(&AuthError::PasswordMismatch));
        }

        #[tokio::test]
        async fn test_signup_rejects_duplicate_username() {
            let mut store = MockStoreClientTrait::new();
            store
                .expect_list_users()
                .returning(|| Ok(existing("dev", "old")));
            store.expect_create_user().never();

            let err = signup(&mut store, "dev", "pw", "pw").await.unwrap_err();
            assert_eq!(
                auth_error(&err),
                Some(&AuthError::UsernameTaken("dev".into()))
            );
        }

        #[tokio::test]
        async fn test_signup_rejects_empty_username() {
            let mut store = MockStoreClientTrait::new();
            let err = signup(&mut store, "   ", "pw", "pw").await.unwrap_err();
            assert_eq!(auth_error(&err), Some(&AuthError::EmptyUsername));
        }
    }

    mod login {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_login_with_matching_password() {
            let mut store = MockStoreClientTrait::new();
            store
                .expect_list_users()
                .returning(|| Ok(existing("dev", "pw")));

            let session = login(&mut store, "dev", "pw").await.unwrap();
            assert_eq!(session.username, "dev");
        }

        #[tokio::test]
        async fn test_login_trims_username_like_signup() {
            let mut store = MockStoreClientTrait::new();
            store
                .expect_list_users()
                .returning(|| Ok(existing("dev", "pw")));

            let session = login(&mut store, " dev ", "pw").await.unwrap();
            assert_eq!(session.username, "dev");
        }

        #[tokio::test]
        async fn test_login_rejects_wrong_password_and_unknown_user() {
            let mut store = MockStoreClientTrait::new();
            store
                .expect_list_users()
                .returning(|| Ok(existing("dev", "pw")));

            let err = login(&mut store, "dev", "PW").await.unwrap_err();
            assert_eq!(auth_error(&err), Some(&AuthError::InvalidCredentials));
            let err = login(&mut store, "nobody", "pw").await.unwrap_err();
            assert_eq!(auth_error(&err), Some(&AuthError::InvalidCredentials));
        }

        #[test]
        fn test_store_errors_propagate() {
            let mut store = MockStoreClientTrait::new();
            store
                .expect_list_users()
                .returning(|| Err(anyhow::anyhow!("disk on fire")));

            let err = tokio_test::block_on(login(&mut store, "dev", "pw")).unwrap_err();
            assert!(auth_error(&err).is_none());
            assert_eq!(err.to_string(), "disk on fire");
        }
    }

    mod sessions {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_logout_clears_session() {
            let mut config = SurveyConfig {
                session: Some(Session {
                    username: "dev".into(),
                }),
                ..Default::default()
            };
            assert_eq!(require_session(&config).unwrap().username, "dev");
            let previous = logout(&mut config);
            assert_eq!(previous.map(|s| s.username), Some("dev".to_string()));
            assert_eq!(require_session(&config), Err(AuthError::NotLoggedIn));
            assert!(logout(&mut config).is_none());
        }
    }
}
