//! Registration, login and caller authentication.
//!
//! # Responsibility
//! - Account creation with validated, unique email addresses.
//! - Credential verification and access-token issuance.
//!
//! # Invariants
//! - Password hashes never leave this module; callers see `SafeUser`.
//! - Login failures for unknown users and wrong passwords are both
//!   reported as validation errors, without distinguishing which.

use crate::model::user::{Caller, SafeUser, User};
use crate::repo::user_repo::UserRepository;
use crate::service::{ServiceError, ServiceResult};
use crate::token;
use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};
use std::time::{SystemTime, UNIX_EPOCH};

/// Access token lifetime: seven days.
pub const TOKEN_TTL_SECS: u64 = 7 * 24 * 60 * 60;

const PASSWORD_HASH_VERSION: &str = "v1";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Successful login outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub user: SafeUser,
    pub token: String,
}

/// Auth use-cases over the user repository.
pub struct AuthService<U: UserRepository> {
    users: U,
    secret: Vec<u8>,
}

impl<U: UserRepository> AuthService<U> {
    /// Creates the service with the token-signing secret supplied by
    /// the embedding edge.
    pub fn new(users: U, secret: impl Into<Vec<u8>>) -> Self {
        Self {
            users,
            secret: secret.into(),
        }
    }

    /// Registers a new account.
    ///
    /// # Errors
    /// - `Validation` when any field is blank, the email is malformed,
    ///   or the email is already used.
    pub fn register(&self, name: &str, email: &str, password: &str) -> ServiceResult<SafeUser> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ServiceError::Validation(
                "all fields are required".to_string(),
            ));
        }
        if !EMAIL_RE.is_match(email) {
            return Err(ServiceError::Validation(format!(
                "invalid email address: {email}"
            )));
        }
        if self.users.find_by_email(email)?.is_some() {
            return Err(ServiceError::Validation("email already used".to_string()));
        }

        let user = User::new(name, email, hash_password(password));
        self.users.create_user(&user)?;
        Ok(user.safe())
    }

    /// Verifies credentials and issues a signed access token.
    ///
    /// # Errors
    /// - `Validation` for blank fields, unknown users and wrong
    ///   credentials alike.
    pub fn login(&self, email: &str, password: &str) -> ServiceResult<LoginOutcome> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(ServiceError::Validation(
                "all fields are required".to_string(),
            ));
        }

        let user = self
            .users
            .find_by_email(email)?
            .ok_or_else(|| ServiceError::Validation("wrong credentials".to_string()))?;
        if !verify_password(password, &user.password_hash) {
            return Err(ServiceError::Validation("wrong credentials".to_string()));
        }

        let token = token::issue(&self.secret, user.id, TOKEN_TTL_SECS, now_epoch_s());
        Ok(LoginOutcome {
            user: user.safe(),
            token,
        })
    }

    /// Resolves a bearer token into a caller identity.
    ///
    /// # Errors
    /// - `AuthorizationDenied` when the token is malformed, tampered
    ///   with, or expired.
    pub fn authenticate(&self, token: &str) -> ServiceResult<Caller> {
        let user_id = token::verify(&self.secret, token, now_epoch_s())
            .map_err(|_| ServiceError::AuthorizationDenied("use this token"))?;
        Ok(Caller::user(user_id))
    }
}

fn now_epoch_s() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_secs())
        .unwrap_or(0)
}

fn hash_password(password: &str) -> String {
    let salt: [u8; 16] = rand::random();
    let salt_hex = hex::encode(salt);
    let digest = salted_digest(&salt_hex, password);
    format!("{PASSWORD_HASH_VERSION}${salt_hex}${digest}")
}

fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.split('$');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(PASSWORD_HASH_VERSION), Some(salt_hex), Some(digest), None) => {
            salted_digest(salt_hex, password) == digest
        }
        _ => false,
    }
}

fn salted_digest(salt_hex: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}
