pub mod auth;
pub mod health;
pub mod usuarios;

use crate::error::AppError;

/// Ponte entre os handlers async e os serviços bloqueantes (diesel síncrono,
/// bcrypt). Nada disso pode rodar direto no executor.
pub(crate) async fn run_blocking<T, F>(task: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| AppError::internal(format!("Blocking task failed: {e}")))?
}
