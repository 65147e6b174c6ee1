//! Registration, login, token verification and password change.

use tracing::instrument;

use crate::api::models::users::CurrentUser;
use crate::auth::{password, session};
use crate::config::Config;
use crate::db::{models::users::UserCreateDBRequest, models::users::UserDBResponse, store::UserStore};
use crate::errors::{Error, Result};
use crate::types::{UserId, abbrev_uuid};

/// A freshly authenticated user and the token issued for them.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: UserDBResponse,
    pub token: String,
}

pub struct AuthService<'a, S: UserStore + ?Sized> {
    store: &'a S,
    config: &'a Config,
}

impl<'a, S: UserStore + ?Sized> AuthService<'a, S> {
    pub fn new(store: &'a S, config: &'a Config) -> Self {
        Self { store, config }
    }

    fn check_password_length(&self, password: &str) -> Result<()> {
        let rules = &self.config.auth.native.password;
        let len = password.chars().count();
        if len == 0 {
            return Err(Error::bad_request("username and password are required"));
        }
        if len < rules.min_length {
            return Err(Error::bad_request(format!("Password must be at least {} characters", rules.min_length)));
        }
        if len > rules.max_length {
            return Err(Error::bad_request(format!("Password must be no more than {} characters", rules.max_length)));
        }
        Ok(())
    }

    async fn hash(&self, password: &str) -> Result<String> {
        let params = self.config.auth.native.password.argon2_params();
        let password = password.to_string();
        // Hash on a blocking thread to avoid stalling the async runtime
        tokio::task::spawn_blocking(move || password::hash_password(&password, params))
            .await
            .map_err(|e| Error::Internal {
                operation: format!("spawn password hashing task: {e}"),
            })?
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool> {
        let password = password.to_string();
        let hash = hash.to_string();
        tokio::task::spawn_blocking(move || password::verify_password(&password, &hash))
            .await
            .map_err(|e| Error::Internal {
                operation: format!("spawn password verification task: {e}"),
            })?
    }

    fn issue(&self, user: UserDBResponse) -> Result<Session> {
        let token = session::create_session_token(&CurrentUser::from(&user), self.config)?;
        Ok(Session { user, token })
    }

    #[instrument(skip(self, password), err)]
    pub async fn register(&self, username: &str, password: &str) -> Result<Session> {
        if !self.config.auth.native.allow_registration {
            return Err(Error::bad_request("User registration is disabled"));
        }

        let username = username.trim();
        if username.is_empty() {
            return Err(Error::bad_request("username and password are required"));
        }
        self.check_password_length(password)?;

        let password_hash = self.hash(password).await?;
        let user = self
            .store
            .create_user(&UserCreateDBRequest {
                username: username.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(user_id = %abbrev_uuid(&user.id), "registered user");
        self.issue(user)
    }

    /// Unknown usernames and wrong passwords fail identically.
    #[instrument(skip(self, password), err)]
    pub async fn login(&self, username: &str, password: &str) -> Result<Session> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(Error::bad_request("username and password are required"));
        }

        let Some(user) = self.store.get_user_by_username(username).await? else {
            return Err(Error::InvalidCredentials);
        };

        if !self.verify(password, &user.password_hash).await? {
            return Err(Error::InvalidCredentials);
        }

        self.issue(user)
    }

    /// Stateless: checks signature and expiry only.
    pub fn verify_token(&self, token: &str) -> Result<CurrentUser> {
        session::verify_session_token(token, self.config)
    }

    #[instrument(skip(self, current_password, new_password), fields(user_id = %abbrev_uuid(&user_id)), err)]
    pub async fn change_password(&self, user_id: UserId, current_password: &str, new_password: &str) -> Result<()> {
        self.check_password_length(new_password)?;

        // A token can outlive its user only if the store was reset; treat that as bad credentials
        let Some(user) = self.store.get_user_by_id(user_id).await? else {
            return Err(Error::InvalidCredentials);
        };

        if !self.verify(current_password, &user.password_hash).await? {
            return Err(Error::InvalidCredentials);
        }

        let password_hash = self.hash(new_password).await?;
        self.store.set_password_hash(user_id, &password_hash).await?;
        Ok(())
    }
}
