// src/db/store.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::error::RepositoryError;
use super::models::refresh_token::RefreshToken;
use super::models::user::{NewUser, UpdateUser, User};

/// Filters and pagination for listing users. Values are expected to be
/// validated by the caller (`page >= 1`, `1 <= limite <= 100`).
#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub cargo: Option<String>,
    pub page: i64,
    pub limite: i64,
}

/// Persistence port for user credentials and account data.
///
/// Services receive this as `Arc<dyn UserStore>` so tests can substitute an
/// in-memory implementation. Storage failures propagate unchanged.
pub trait UserStore: Send + Sync {
    /// Lookup by login key. The returned row includes the password hash and
    /// the pending reset token fields.
    fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError>;

    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;

    /// Returns the matching page plus the total row count for the filter.
    fn list(&self, filter: &UserFilter) -> Result<(Vec<User>, i64), RepositoryError>;

    fn create(&self, new_user: &NewUser) -> Result<User, RepositoryError>;

    fn update(&self, id: Uuid, changes: &UpdateUser) -> Result<User, RepositoryError>;

    /// Stores a new password hash and clears `senha_token` and
    /// `senha_token_expira` in the same statement.
    fn update_password(&self, id: Uuid, senha_hash: &str) -> Result<User, RepositoryError>;

    fn set_reset_token(
        &self,
        id: Uuid,
        token: &str,
        expira: DateTime<Utc>,
    ) -> Result<User, RepositoryError>;

    fn delete(&self, id: Uuid) -> Result<(), RepositoryError>;
}

/// Persistence port for the single-active-session refresh token table.
pub trait RefreshTokenStore: Send + Sync {
    /// Deletes every token held by `user_id`, then inserts `token`, inside
    /// one transaction. At most one row per user survives.
    fn replace(&self, user_id: Uuid, token: &str) -> Result<RefreshToken, RepositoryError>;

    fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, RepositoryError>;

    /// Idempotent: deleting a token that is already gone is not an error.
    fn delete_by_token(&self, token: &str) -> Result<(), RepositoryError>;

    fn delete_by_user(&self, user_id: Uuid) -> Result<(), RepositoryError>;
}
