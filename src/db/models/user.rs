use crate::db::schema::users;
use crate::dto::responses::UsuarioResponse;
use chrono::{DateTime, Utc};
use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use uuid::Uuid;

/// Role tag stored as plain text in the `cargo` column.
/// Unknown values fall back to `Comum` so a bad row never grants admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cargo {
    Admin,
    Comum,
}

impl Cargo {
    pub fn is_known(value: &str) -> bool {
        matches!(value, "admin" | "comum")
    }
}

impl From<&str> for Cargo {
    fn from(value: &str) -> Self {
        match value {
            "admin" => Cargo::Admin,
            _ => Cargo::Comum,
        }
    }
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = users)]
pub struct NewUser {
    pub nome: String,
    pub email: String,
    pub senha_hash: Option<String>,
    pub cargo: String,
}

#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub senha_hash: Option<String>,
    pub cargo: String,
    pub senha_token: Option<String>,
    pub senha_token_expira: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn role(&self) -> Cargo {
        Cargo::from(self.cargo.as_str())
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Cargo::Admin
    }
}

impl From<User> for UsuarioResponse {
    fn from(user: User) -> Self {
        UsuarioResponse {
            id: user.id,
            nome: user.nome,
            email: user.email,
            cargo: user.cargo,
            created_at: user.created_at,
        }
    }
}

/// Changes accepted by PATCH. Email and password are absent: both change
/// only through the reset flow.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = users)]
pub struct UpdateUser {
    pub nome: Option<String>,
    pub cargo: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}
