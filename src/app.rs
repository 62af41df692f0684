// src/app.rs

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::auth::jwt::JwtManager;
use crate::auth::services::AuthService;
use crate::db::store::UserStore;
use crate::handlers::auth::{definir_senha, login, logout, recuperar_senha, refresh_token, revoke};
use crate::handlers::health::health;
use crate::handlers::usuarios::{atualizar, buscar, criar, deletar, listar};
use crate::usuarios::UsuarioService;

/// Estado compartilhado do router. Serviços e stores entram por `Arc`; o
/// extrator de identidade usa `jwt_manager` e `users` diretamente.
#[derive(Clone)]
pub struct AppState {
    pub jwt_manager: JwtManager,
    pub users: Arc<dyn UserStore>,
    pub auth_service: Arc<AuthService>,
    pub usuario_service: Arc<UsuarioService>,
}

/// Monta a aplicação completa. As rotas protegidas não ficam em um grupo à
/// parte: a proteção é o extrator `CurrentUser` na assinatura do handler.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        // Sessão
        .route("/login", post(login))
        .route("/token", post(refresh_token))
        .route("/logout", post(logout))
        .route("/token/revoke", post(revoke))
        // Senha
        .route("/senha/recuperar", post(recuperar_senha))
        .route("/usuarios/senha", post(definir_senha))
        // Usuários
        .route("/usuarios", get(listar).post(criar))
        .route(
            "/usuarios/{id}",
            get(buscar).patch(atualizar).delete(deletar),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
