use crate::db::error::RepositoryError;
use crate::db::models::user::{NewUser, UpdateUser, User};
use crate::db::schema::users;
use crate::db::store::{UserFilter, UserStore};
use crate::db::{DbConnection, DbPool};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

/// Diesel-backed [`UserStore`]. Holds the pool it was constructed with; no
/// ambient connection state.
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<DbConnection, RepositoryError> {
        self.pool.get().map_err(Into::into)
    }
}

impl UserStore for UserRepository {
    fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.conn()?;

        users::table
            .filter(users::email.eq(email))
            .first::<User>(&mut conn)
            .optional()
            .map_err(Into::into)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let mut conn = self.conn()?;

        users::table
            .filter(users::id.eq(id))
            .first::<User>(&mut conn)
            .optional()
            .map_err(Into::into)
    }

    fn list(&self, filter: &UserFilter) -> Result<(Vec<User>, i64), RepositoryError> {
        let mut conn = self.conn()?;

        let mut query = users::table.into_boxed();
        let mut count_query = users::table.into_boxed();

        if let Some(nome) = &filter.nome {
            let pattern = format!("%{}%", nome);
            query = query.filter(users::nome.ilike(pattern.clone()));
            count_query = count_query.filter(users::nome.ilike(pattern));
        }
        if let Some(email) = &filter.email {
            query = query.filter(users::email.eq(email.clone()));
            count_query = count_query.filter(users::email.eq(email.clone()));
        }
        if let Some(cargo) = &filter.cargo {
            query = query.filter(users::cargo.eq(cargo.clone()));
            count_query = count_query.filter(users::cargo.eq(cargo.clone()));
        }

        let total = count_query.count().get_result::<i64>(&mut conn)?;

        // Saturating: um `page` gigantesco vira um offset além do fim da
        // tabela (página vazia), nunca um overflow.
        let docs = query
            .order(users::created_at.desc())
            .limit(filter.limite)
            .offset((filter.page - 1).saturating_mul(filter.limite))
            .load::<User>(&mut conn)?;

        Ok((docs, total))
    }

    fn create(&self, new_user: &NewUser) -> Result<User, RepositoryError> {
        let mut conn = self.conn()?;

        diesel::insert_into(users::table)
            .values(new_user)
            .get_result::<User>(&mut conn)
            .map_err(Into::into)
    }

    fn update(&self, id: Uuid, changes: &UpdateUser) -> Result<User, RepositoryError> {
        let mut conn = self.conn()?;

        diesel::update(users::table.filter(users::id.eq(id)))
            .set(changes)
            .get_result::<User>(&mut conn)
            .map_err(Into::into)
    }

    fn update_password(&self, id: Uuid, senha_hash: &str) -> Result<User, RepositoryError> {
        let mut conn = self.conn()?;

        diesel::update(users::table.filter(users::id.eq(id)))
            .set((
                users::senha_hash.eq(senha_hash),
                users::senha_token.eq(None::<String>),
                users::senha_token_expira.eq(None::<DateTime<Utc>>),
                users::updated_at.eq(Utc::now()),
            ))
            .get_result::<User>(&mut conn)
            .map_err(Into::into)
    }

    fn set_reset_token(
        &self,
        id: Uuid,
        token: &str,
        expira: DateTime<Utc>,
    ) -> Result<User, RepositoryError> {
        let mut conn = self.conn()?;

        diesel::update(users::table.filter(users::id.eq(id)))
            .set((
                users::senha_token.eq(token),
                users::senha_token_expira.eq(expira),
                users::updated_at.eq(Utc::now()),
            ))
            .get_result::<User>(&mut conn)
            .map_err(Into::into)
    }

    fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        let mut conn = self.conn()?;

        diesel::delete(users::table.filter(users::id.eq(id))).execute(&mut conn)?;

        Ok(())
    }
}
