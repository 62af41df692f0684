mod app;
mod auth;
mod config;
mod db;
mod dto;
mod error;
mod handlers;
mod mailer;
mod usuarios;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{AppState, build_router};
use auth::jwt::JwtManager;
use auth::services::AuthService;
use config::Config;
use db::repositories::refresh_token_repository::RefreshTokenRepository;
use db::repositories::user_repository::UserRepository;
use mailer::LogMailer;
use usuarios::UsuarioService;

fn setup_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        // Regras padrão quando RUST_LOG não está definido
        tracing_subscriber::EnvFilter::new(
            "info,patrimonio_api=debug,hyper_util=warn,tower_http=info",
        )
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();
    tracing::info!("Starting patrimonio-api...");

    let config = Config::from_env()?;
    let pool = db::connection::create_pool(&config.database_url)?;

    // Composição explícita: repositórios atrás dos traits de store, serviços
    // por cima, nenhum singleton ambiente.
    let users: Arc<dyn db::store::UserStore> = Arc::new(UserRepository::new(pool.clone()));
    let refresh_tokens: Arc<dyn db::store::RefreshTokenStore> =
        Arc::new(RefreshTokenRepository::new(pool));

    let jwt_manager = JwtManager::new(&config.jwt_secret, config.jwt_expiration_minutes);
    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        refresh_tokens,
        jwt_manager.clone(),
        Arc::new(LogMailer),
        config.password_reset_url.clone(),
    ));
    let usuario_service = Arc::new(UsuarioService::new(users.clone(), auth_service.clone()));

    let state = AppState {
        jwt_manager,
        users,
        auth_service,
        usuario_service,
    };
    let app = build_router(state);

    let addr = format!("{}:{}", config.server_host, config.server_port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server running at http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
