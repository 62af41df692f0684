// src/handlers/auth.rs

use axum::{
    Json,
    extract::{Query, State},
};

use crate::app::AppState;
use crate::auth::extractors::CurrentUser;
use crate::dto::requests::{
    LoginRequest, NovaSenhaRequest, RecuperarSenhaRequest, RefreshTokenRequest, RevokeRequest,
    SenhaTokenQuery,
};
use crate::dto::responses::{AccessTokenResponse, LoginResponse, MessageResponse};
use crate::error::AppError;

use super::run_blocking;

/// POST /login
/// Autentica por email e senha e abre uma nova sessão.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let service = state.auth_service;
    let response = run_blocking(move || service.login(&payload.email, &payload.senha)).await?;

    Ok(Json(response))
}

/// POST /token
/// Troca um refresh token válido por um novo access token.
pub async fn refresh_token(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<Json<AccessTokenResponse>, AppError> {
    let service = state.auth_service;
    let response = run_blocking(move || service.refresh(&payload.refresh_token)).await?;

    Ok(Json(response))
}

/// POST /logout
/// Encerra a sessão do refresh token informado. Idempotente.
pub async fn logout(
    State(state): State<AppState>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let service = state.auth_service;
    run_blocking(move || service.logout(&payload.refresh_token)).await?;

    Ok(Json(MessageResponse::new("Logout realizado com sucesso.")))
}

/// POST /token/revoke
/// Revoga todas as sessões de um usuário. Somente administradores.
pub async fn revoke(
    current: CurrentUser,
    State(state): State<AppState>,
    Json(payload): Json<RevokeRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    if !current.is_admin() {
        return Err(AppError::forbidden("Acesso restrito a administradores."));
    }

    let service = state.auth_service;
    run_blocking(move || service.revoke(payload.user_id)).await?;

    Ok(Json(MessageResponse::new(
        "Sessões do usuário revogadas com sucesso.",
    )))
}

/// POST /senha/recuperar
/// Dispara o email de redefinição. A resposta é a mesma para email conhecido
/// ou não.
pub async fn recuperar_senha(
    State(state): State<AppState>,
    Json(payload): Json<RecuperarSenhaRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let service = state.auth_service;
    run_blocking(move || service.request_password_reset(&payload.email)).await?;

    Ok(Json(MessageResponse::new(
        "Se o email estiver cadastrado, um link de redefinição de senha foi enviado.",
    )))
}

/// POST /usuarios/senha?token=...
/// Define a senha a partir do token de redefinição enviado por email.
pub async fn definir_senha(
    State(state): State<AppState>,
    Query(query): Query<SenhaTokenQuery>,
    Json(payload): Json<NovaSenhaRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let token = query
        .token
        .ok_or_else(|| AppError::validation(Some("token"), "Token não informado."))?;

    let service = state.auth_service;
    run_blocking(move || service.set_password_from_token(&token, &payload.senha)).await?;

    Ok(Json(MessageResponse::new("Senha definida com sucesso.")))
}
