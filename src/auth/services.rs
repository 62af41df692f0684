// src/auth/services.rs

use crate::db::store::{RefreshTokenStore, UserStore};
use crate::dto::responses::{AccessTokenResponse, LoginResponse};
use crate::error::AppError;
use crate::mailer::Mailer;
use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::jwt::{JwtManager, RESET_TOKEN_MINUTES};
use super::password::PasswordManager;

/// Session lifecycle service: login, refresh, logout, revoke and the
/// password-reset flow. Constructed with its stores, token manager and
/// mailer injected; holds no state of its own between requests.
///
/// Every method does blocking work (bcrypt, synchronous diesel), so handlers
/// call them through `spawn_blocking`.
pub struct AuthService {
    users: Arc<dyn UserStore>,
    refresh_tokens: Arc<dyn RefreshTokenStore>,
    jwt_manager: JwtManager,
    mailer: Arc<dyn Mailer>,
    password_reset_url: String,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        refresh_tokens: Arc<dyn RefreshTokenStore>,
        jwt_manager: JwtManager,
        mailer: Arc<dyn Mailer>,
        password_reset_url: String,
    ) -> Self {
        Self {
            users,
            refresh_tokens,
            jwt_manager,
            mailer,
            password_reset_url,
        }
    }

    /// Verifica as credenciais e abre uma nova sessão.
    ///
    /// Missing user, unset password and wrong password all return the same
    /// error, so responses never reveal which emails are registered. The
    /// previous refresh token of the user is replaced, not accumulated.
    pub fn login(&self, email: &str, senha: &str) -> Result<LoginResponse, AppError> {
        let user = match self.users.find_by_email(email)? {
            Some(user) => user,
            None => {
                tracing::warn!("Login failed: user not found");
                return Err(AppError::invalid_credentials());
            }
        };

        let Some(senha_hash) = user.senha_hash.as_deref() else {
            tracing::warn!("Login failed: password not set");
            return Err(AppError::invalid_credentials());
        };

        if !PasswordManager::verify(senha, senha_hash)? {
            tracing::warn!("Login failed: invalid password");
            return Err(AppError::invalid_credentials());
        }

        let access_token = self.jwt_manager.generate_access_token(user.id)?;
        let refresh_token = self.jwt_manager.generate_refresh_token();

        self.refresh_tokens.replace(user.id, &refresh_token)?;

        Ok(LoginResponse {
            access_token,
            refresh_token,
        })
    }

    /// Troca um refresh token válido por um novo access token.
    ///
    /// An unknown token covers every dead-session case alike: logged out,
    /// revoked, replaced by a newer login, or never issued. The stored token
    /// is not rotated; it stays valid until logout, revoke or the next login.
    pub fn refresh(&self, refresh_token: &str) -> Result<AccessTokenResponse, AppError> {
        let stored = self
            .refresh_tokens
            .find_by_token(refresh_token)?
            .ok_or_else(AppError::invalid_refresh_token)?;

        // A deleted account invalidates its sessions on the next refresh.
        let user = self
            .users
            .find_by_id(stored.user_id)?
            .ok_or_else(AppError::invalid_refresh_token)?;

        let access_token = self.jwt_manager.generate_access_token(user.id)?;

        Ok(AccessTokenResponse { access_token })
    }

    /// Encerra a sessão associada ao refresh token. Idempotente.
    pub fn logout(&self, refresh_token: &str) -> Result<(), AppError> {
        self.refresh_tokens.delete_by_token(refresh_token)?;
        Ok(())
    }

    /// Revoga todas as sessões do usuário. The admin role check belongs to
    /// the HTTP handler, not here.
    pub fn revoke(&self, user_id: Uuid) -> Result<(), AppError> {
        self.refresh_tokens.delete_by_user(user_id)?;
        Ok(())
    }

    /// Gera e envia por email um token de redefinição de senha.
    ///
    /// For an unknown email this still returns `Ok` and sends nothing; the
    /// HTTP response is identical either way.
    pub fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        let Some(user) = self.users.find_by_email(email)? else {
            tracing::debug!("Password reset requested for unknown email");
            return Ok(());
        };

        let token = self.jwt_manager.generate_reset_token(&user.email)?;
        let expira = Utc::now() + Duration::minutes(RESET_TOKEN_MINUTES);
        self.users.set_reset_token(user.id, &token, expira)?;

        let link = format!("{}?token={}", self.password_reset_url, token);
        let body = format!(
            "Olá, {}!\n\nAcesse o link abaixo para definir a sua senha:\n{}\n\n\
             O link expira em {} minutos.",
            user.nome, link, RESET_TOKEN_MINUTES
        );
        let delivery_id = self.mailer.send(&user.email, "Redefinição de senha", &body)?;
        tracing::debug!(%delivery_id, "Reset email dispatched");

        Ok(())
    }

    /// Define a senha a partir de um token de redefinição.
    ///
    /// The token must verify as a reset JWT, match the one stored on the
    /// user row (which makes it single-use) and be inside the stored expiry
    /// window. On success the new hash is stored and both reset fields are
    /// cleared.
    pub fn set_password_from_token(&self, token: &str, senha: &str) -> Result<(), AppError> {
        if !PasswordManager::is_strong(senha) {
            return Err(AppError::weak_senha());
        }

        let claims = self.jwt_manager.verify_reset_token(token)?;

        let user = self
            .users
            .find_by_email(&claims.email)?
            .ok_or_else(|| AppError::authentication("Usuário não encontrado."))?;

        match user.senha_token.as_deref() {
            Some(stored) if stored == token => {}
            _ => {
                return Err(AppError::authentication(
                    "Token de redefinição de senha inválido.",
                ));
            }
        }

        let expira = user.senha_token_expira.ok_or_else(|| {
            AppError::authentication("Token de redefinição de senha inválido.")
        })?;
        if expira < Utc::now() {
            return Err(AppError::token_expired(
                "O token de redefinição de senha está expirado.",
            ));
        }

        let senha_hash = PasswordManager::hash(senha)?;
        self.users.update_password(user.id, &senha_hash)?;

        Ok(())
    }
}
