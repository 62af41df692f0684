use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};
use uuid::Uuid;

use crate::app::AppState;
use crate::db::models::user::Cargo;
use crate::error::AppError;

/// Identidade resolvida para rotas protegidas.
///
/// Valida `Authorization: Bearer <JWT>`, verifica o token via `JwtManager`
/// e rebusca o usuário no banco: um token ainda assinado não dá acesso a uma
/// conta que já foi excluída. O cargo vem sempre da linha atual, nunca do
/// token.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub cargo: String,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        Cargo::from(self.cargo.as_str()) == Cargo::Admin
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts.headers.get(header::AUTHORIZATION).ok_or_else(|| {
            AppError::authentication("Acesso negado, o token de autenticação não existe!")
        })?;

        let auth_str = auth_header.to_str().map_err(|_| {
            AppError::authentication("Formato do token de autenticação inválido!")
        })?;

        const BEARER: &str = "Bearer ";
        if !auth_str.starts_with(BEARER) {
            return Err(AppError::authentication(
                "Formato do token de autenticação inválido!",
            ));
        }

        let token = &auth_str[BEARER.len()..];
        if token.is_empty() {
            return Err(AppError::authentication(
                "Formato do token de autenticação inválido!",
            ));
        }

        // Expired e Invalid chegam distintos na resposta: o cliente decide
        // entre tentar o refresh ou pedir novo login.
        let claims = state.jwt_manager.verify_token(token)?;

        let users = state.users.clone();
        let user = tokio::task::spawn_blocking(move || users.find_by_id(claims.sub))
            .await
            .map_err(|e| AppError::internal(format!("Blocking task failed: {e}")))??
            .ok_or_else(|| AppError::authentication("Usuário não encontrado."))?;

        Ok(CurrentUser {
            id: user.id,
            nome: user.nome,
            email: user.email,
            cargo: user.cargo,
        })
    }
}
