use crate::db::error::RepositoryError;
use crate::db::models::refresh_token::{NewRefreshToken, RefreshToken};
use crate::db::schema::refresh_tokens;
use crate::db::store::RefreshTokenStore;
use crate::db::{DbConnection, DbPool};
use diesel::prelude::*;
use uuid::Uuid;

/// Diesel-backed [`RefreshTokenStore`].
pub struct RefreshTokenRepository {
    pool: DbPool,
}

impl RefreshTokenRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConnection, RepositoryError> {
        self.pool.get().map_err(Into::into)
    }
}

impl RefreshTokenStore for RefreshTokenRepository {
    fn replace(&self, user_id: Uuid, token: &str) -> Result<RefreshToken, RepositoryError> {
        let mut conn = self.conn()?;
        let new_token = NewRefreshToken {
            user_id,
            token: token.to_string(),
        };

        // Delete-then-insert in one transaction: concurrent logins for the
        // same user serialize here and exactly one row survives.
        conn.transaction(|conn| {
            diesel::delete(refresh_tokens::table.filter(refresh_tokens::user_id.eq(user_id)))
                .execute(conn)?;

            diesel::insert_into(refresh_tokens::table)
                .values(&new_token)
                .get_result::<RefreshToken>(conn)
        })
        .map_err(Into::into)
    }

    fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, RepositoryError> {
        let mut conn = self.conn()?;

        refresh_tokens::table
            .filter(refresh_tokens::token.eq(token))
            .first::<RefreshToken>(&mut conn)
            .optional()
            .map_err(Into::into)
    }

    fn delete_by_token(&self, token: &str) -> Result<(), RepositoryError> {
        let mut conn = self.conn()?;

        diesel::delete(refresh_tokens::table.filter(refresh_tokens::token.eq(token)))
            .execute(&mut conn)?;

        Ok(())
    }

    fn delete_by_user(&self, user_id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.conn()?;

        diesel::delete(refresh_tokens::table.filter(refresh_tokens::user_id.eq(user_id)))
            .execute(&mut conn)?;

        Ok(())
    }
}
