// src/testing.rs
//
// In-memory implementations of the storage and mailer ports, shared by the
// service, extractor and router tests. Compiled only for tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::jwt::JwtManager;
use crate::auth::password::PasswordManager;
use crate::auth::services::AuthService;
use crate::db::error::RepositoryError;
use crate::db::models::refresh_token::RefreshToken;
use crate::db::models::user::{NewUser, UpdateUser, User};
use crate::db::store::{RefreshTokenStore, UserFilter, UserStore};
use crate::mailer::{Mailer, MailerError};
use crate::usuarios::UsuarioService;

pub fn usuario_com_senha(email: &str, senha: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        nome: "Usuário de Teste".to_string(),
        email: email.to_string(),
        senha_hash: Some(PasswordManager::hash(senha).expect("hash")),
        cargo: "comum".to_string(),
        senha_token: None,
        senha_token_expira: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn usuario_com_cargo(email: &str, cargo: &str) -> User {
    let mut user = usuario_com_senha(email, "SenhaForte99");
    user.cargo = cargo.to_string();
    user
}

// ---------------- UserStore ----------------

#[derive(Default)]
pub struct MemUserStore {
    rows: Mutex<Vec<User>>,
}

impl MemUserStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn insert(&self, user: User) -> User {
        self.rows.lock().expect("lock").push(user.clone());
        user
    }

    pub fn get(&self, id: Uuid) -> Option<User> {
        self.rows
            .lock()
            .expect("lock")
            .iter()
            .find(|u| u.id == id)
            .cloned()
    }

    /// Rewrites the stored reset expiry, to simulate the clock passing it.
    pub fn force_reset_expiry(&self, id: Uuid, expira: DateTime<Utc>) {
        let mut rows = self.rows.lock().expect("lock");
        if let Some(user) = rows.iter_mut().find(|u| u.id == id) {
            user.senha_token_expira = Some(expira);
        }
    }
}

impl UserStore for MemUserStore {
    fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .expect("lock")
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        Ok(self.get(id))
    }

    fn list(&self, filter: &UserFilter) -> Result<(Vec<User>, i64), RepositoryError> {
        let rows = self.rows.lock().expect("lock");

        let mut matched: Vec<User> = rows
            .iter()
            .filter(|u| {
                filter
                    .nome
                    .as_deref()
                    .is_none_or(|n| u.nome.to_lowercase().contains(&n.to_lowercase()))
            })
            .filter(|u| filter.email.as_deref().is_none_or(|e| u.email == e))
            .filter(|u| filter.cargo.as_deref().is_none_or(|c| u.cargo == c))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let total = matched.len() as i64;
        let offset = usize::try_from((filter.page - 1).saturating_mul(filter.limite))
            .unwrap_or(usize::MAX);
        let docs = matched
            .into_iter()
            .skip(offset)
            .take(filter.limite as usize)
            .collect();

        Ok((docs, total))
    }

    fn create(&self, new_user: &NewUser) -> Result<User, RepositoryError> {
        let mut rows = self.rows.lock().expect("lock");

        if rows.iter().any(|u| u.email == new_user.email) {
            return Err(RepositoryError::UniqueViolation(
                "duplicate key value violates unique constraint \"users_email_key\"".to_string(),
            ));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            nome: new_user.nome.clone(),
            email: new_user.email.clone(),
            senha_hash: new_user.senha_hash.clone(),
            cargo: new_user.cargo.clone(),
            senha_token: None,
            senha_token_expira: None,
            created_at: now,
            updated_at: now,
        };
        rows.push(user.clone());

        Ok(user)
    }

    fn update(&self, id: Uuid, changes: &UpdateUser) -> Result<User, RepositoryError> {
        let mut rows = self.rows.lock().expect("lock");
        let user = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| RepositoryError::NotFound("Record not found".to_string()))?;

        if let Some(nome) = &changes.nome {
            user.nome = nome.clone();
        }
        if let Some(cargo) = &changes.cargo {
            user.cargo = cargo.clone();
        }
        if let Some(updated_at) = changes.updated_at {
            user.updated_at = updated_at;
        }

        Ok(user.clone())
    }

    fn update_password(&self, id: Uuid, senha_hash: &str) -> Result<User, RepositoryError> {
        let mut rows = self.rows.lock().expect("lock");
        let user = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| RepositoryError::NotFound("Record not found".to_string()))?;

        user.senha_hash = Some(senha_hash.to_string());
        user.senha_token = None;
        user.senha_token_expira = None;
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    fn set_reset_token(
        &self,
        id: Uuid,
        token: &str,
        expira: DateTime<Utc>,
    ) -> Result<User, RepositoryError> {
        let mut rows = self.rows.lock().expect("lock");
        let user = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| RepositoryError::NotFound("Record not found".to_string()))?;

        user.senha_token = Some(token.to_string());
        user.senha_token_expira = Some(expira);
        user.updated_at = Utc::now();

        Ok(user.clone())
    }

    fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.rows.lock().expect("lock").retain(|u| u.id != id);
        Ok(())
    }
}

// ---------------- RefreshTokenStore ----------------

#[derive(Default)]
pub struct MemRefreshTokenStore {
    rows: Mutex<Vec<RefreshToken>>,
}

impl MemRefreshTokenStore {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }

    pub fn count_for_user(&self, user_id: Uuid) -> usize {
        self.rows
            .lock()
            .expect("lock")
            .iter()
            .filter(|t| t.user_id == user_id)
            .count()
    }
}

impl RefreshTokenStore for MemRefreshTokenStore {
    fn replace(&self, user_id: Uuid, token: &str) -> Result<RefreshToken, RepositoryError> {
        let mut rows = self.rows.lock().expect("lock");

        rows.retain(|t| t.user_id != user_id);
        let row = RefreshToken {
            id: Uuid::new_v4(),
            user_id,
            token: token.to_string(),
            created_at: Utc::now(),
        };
        rows.push(row.clone());

        Ok(row)
    }

    fn find_by_token(&self, token: &str) -> Result<Option<RefreshToken>, RepositoryError> {
        Ok(self
            .rows
            .lock()
            .expect("lock")
            .iter()
            .find(|t| t.token == token)
            .cloned())
    }

    fn delete_by_token(&self, token: &str) -> Result<(), RepositoryError> {
        self.rows.lock().expect("lock").retain(|t| t.token != token);
        Ok(())
    }

    fn delete_by_user(&self, user_id: Uuid) -> Result<(), RepositoryError> {
        self.rows
            .lock()
            .expect("lock")
            .retain(|t| t.user_id != user_id);
        Ok(())
    }
}

// ---------------- Mailer ----------------

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[derive(Default)]
pub struct MemMailer {
    sent: Mutex<Vec<SentMail>>,
    failing: Mutex<bool>,
}

impl MemMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: Mutex::new(false),
        }
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().expect("lock").clone()
    }

    /// Makes every following `send` fail, to simulate a dead transport.
    pub fn fail_deliveries(&self) {
        *self.failing.lock().expect("lock") = true;
    }
}

impl Mailer for MemMailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> Result<String, MailerError> {
        if *self.failing.lock().expect("lock") {
            return Err(MailerError::DeliveryFailed(
                "transport unavailable".to_string(),
            ));
        }

        self.sent.lock().expect("lock").push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });

        Ok(format!("mem-{}", Uuid::new_v4()))
    }
}

// ---------------- AppState wiring ----------------

pub struct TestFixtures {
    pub users: Arc<MemUserStore>,
    pub refresh_tokens: Arc<MemRefreshTokenStore>,
    pub mailer: Arc<MemMailer>,
}

/// Full application state over in-memory stores, for extractor and router
/// tests. The fixtures hand the tests direct access to the backing data.
pub fn test_state() -> (AppState, TestFixtures) {
    let users = Arc::new(MemUserStore::new());
    let refresh_tokens = Arc::new(MemRefreshTokenStore::new());
    let mailer = Arc::new(MemMailer::new());
    let jwt_manager = JwtManager::new("test_secret_for_router_tests", 15);

    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        refresh_tokens.clone(),
        jwt_manager.clone(),
        mailer.clone(),
        "http://localhost:3000/usuarios/senha".to_string(),
    ));
    let usuario_service = Arc::new(UsuarioService::new(users.clone(), auth_service.clone()));

    let state = AppState {
        jwt_manager,
        users: users.clone(),
        auth_service,
        usuario_service,
    };

    let fixtures = TestFixtures {
        users,
        refresh_tokens,
        mailer,
    };

    (state, fixtures)
}
