// src/handlers/usuarios.rs

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::app::AppState;
use crate::auth::extractors::CurrentUser;
use crate::dto::requests::{AtualizarUsuarioRequest, CriarUsuarioRequest, ListarUsuariosQuery};
use crate::dto::responses::{MessageResponse, PaginaUsuariosResponse, UsuarioResponse};
use crate::error::AppError;

use super::run_blocking;

fn exigir_admin(current: &CurrentUser) -> Result<(), AppError> {
    if current.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden("Acesso restrito a administradores."))
    }
}

/// GET /usuarios
/// Lista usuários com filtros e paginação. Qualquer usuário autenticado.
pub async fn listar(
    _current: CurrentUser,
    State(state): State<AppState>,
    Query(query): Query<ListarUsuariosQuery>,
) -> Result<Json<PaginaUsuariosResponse>, AppError> {
    let service = state.usuario_service;
    let pagina = run_blocking(move || service.listar(&query)).await?;

    Ok(Json(pagina))
}

/// GET /usuarios/:id
pub async fn buscar(
    _current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UsuarioResponse>, AppError> {
    let service = state.usuario_service;
    let usuario = run_blocking(move || service.buscar(id)).await?;

    Ok(Json(usuario))
}

/// POST /usuarios
/// Cria um usuário. Somente administradores.
pub async fn criar(
    current: CurrentUser,
    State(state): State<AppState>,
    Json(payload): Json<CriarUsuarioRequest>,
) -> Result<(StatusCode, Json<UsuarioResponse>), AppError> {
    exigir_admin(&current)?;

    let service = state.usuario_service;
    let usuario = run_blocking(move || service.criar(payload)).await?;

    Ok((StatusCode::CREATED, Json(usuario)))
}

/// PATCH /usuarios/:id
/// Atualiza nome e cargo. Somente administradores.
pub async fn atualizar(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AtualizarUsuarioRequest>,
) -> Result<Json<UsuarioResponse>, AppError> {
    exigir_admin(&current)?;

    let service = state.usuario_service;
    let usuario = run_blocking(move || service.atualizar(id, payload)).await?;

    Ok(Json(usuario))
}

/// DELETE /usuarios/:id
/// Somente administradores.
pub async fn deletar(
    current: CurrentUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    exigir_admin(&current)?;

    let service = state.usuario_service;
    run_blocking(move || service.deletar(id)).await?;

    Ok(Json(MessageResponse::new("Usuário excluído com sucesso.")))
}
