// src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::dto::responses::ErrorResponse;

#[derive(Debug, Clone, thiserror::Error)]
pub enum AppError {
    // === Erros de autenticação (401) ===
    #[error("Authentication failed: {0}")]
    Authentication(String),
    /// Assinatura válida, relógio passou do `exp`. Mantido separado de
    /// [`AppError::Authentication`] para o cliente saber que um refresh
    /// resolve, sem precisar de novo login.
    #[error("Token expired: {0}")]
    TokenExpired(String),

    // === Autorização (403) ===
    #[error("Forbidden: {0}")]
    Forbidden(String),

    // === Erros de validação (400) ===
    #[error("Validation error: {message}")]
    Validation {
        field: Option<String>,
        message: String,
    },

    // === Erros de recurso (404) ===
    #[error("Not found: {0}")]
    NotFound(String),

    // === Erros internos (500) ===
    #[error("Database error: {0}")]
    Database(String),
    #[error("Password hashing failed: {0}")]
    Hashing(String),
    #[error("Token generation failed: {0}")]
    TokenGeneration(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_code, message, internal_detail) = self.get_error_info();

        if let Some(ref detail) = internal_detail {
            tracing::error!(error_code, %status, detail, "Internal server error");
        }

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            field: self.field().map(String::from),
        });

        (status, body).into_response()
    }
}

impl AppError {
    /// Status, código estável e mensagem visível para a resposta HTTP.
    /// O quarto elemento é o detalhe interno, logado mas nunca devolvido.
    fn get_error_info(&self) -> (StatusCode, &'static str, String, Option<String>) {
        match self {
            // 401 Unauthorized
            AppError::Authentication(msg) => (
                StatusCode::UNAUTHORIZED,
                "AUTHENTICATION_ERROR",
                msg.clone(),
                None,
            ),
            AppError::TokenExpired(msg) => {
                (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED", msg.clone(), None)
            }

            // 403 Forbidden
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone(), None),

            // 400 Bad Request
            AppError::Validation { message, .. } => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                message.clone(),
                None,
            ),

            // 404 Not Found
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),

            // 500 Internal Server Error
            AppError::Database(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "Erro interno ao acessar o banco de dados.".to_string(),
                Some(msg.clone()),
            ),
            AppError::Hashing(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "HASHING_ERROR",
                "Erro interno ao processar a requisição.".to_string(),
                Some(msg.clone()),
            ),
            AppError::TokenGeneration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "TOKEN_ERROR",
                "Erro interno ao gerar o token.".to_string(),
                Some(msg.clone()),
            ),
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Erro interno do servidor.".to_string(),
                Some(msg.clone()),
            ),
        }
    }

    fn field(&self) -> Option<&str> {
        match self {
            AppError::Validation { field, .. } => field.as_deref(),
            _ => None,
        }
    }

    // === Construtores ===
    pub fn authentication(msg: impl Into<String>) -> Self {
        AppError::Authentication(msg.into())
    }

    /// Credenciais erradas, email desconhecido e senha nunca definida usam
    /// a mesma mensagem: a resposta não pode revelar quais emails existem.
    pub fn invalid_credentials() -> Self {
        AppError::Authentication("Email ou senha inválidos.".to_string())
    }

    pub fn invalid_refresh_token() -> Self {
        AppError::Authentication("Refresh token inválido.".to_string())
    }

    pub fn token_expired(msg: impl Into<String>) -> Self {
        AppError::TokenExpired(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }

    pub fn validation(field: Option<&str>, msg: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.map(String::from),
            message: msg.into(),
        }
    }

    pub fn weak_senha() -> Self {
        AppError::validation(
            Some("senha"),
            "A senha deve ter no mínimo 8 caracteres, com letras maiúsculas, \
             minúsculas e números.",
        )
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn database(msg: impl Into<String>) -> Self {
        AppError::Database(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }

    /// Retorna o código de status HTTP
    pub fn status_code(&self) -> StatusCode {
        self.get_error_info().0
    }
}

// === Conversões automáticas a partir dos erros das camadas internas ===

impl From<crate::db::error::RepositoryError> for AppError {
    fn from(err: crate::db::error::RepositoryError) -> Self {
        use crate::db::error::RepositoryError;

        match err {
            RepositoryError::NotFound(msg) => AppError::not_found(msg),
            // Índice único violado: o cliente mandou um valor já em uso.
            RepositoryError::UniqueViolation(msg) => AppError::validation(None, msg),
            RepositoryError::PoolError(msg)
            | RepositoryError::ForeignKeyViolation(msg)
            | RepositoryError::DatabaseError(msg) => AppError::database(msg),
        }
    }
}

impl From<crate::auth::jwt::JwtError> for AppError {
    fn from(err: crate::auth::jwt::JwtError) -> Self {
        use crate::auth::jwt::JwtError;

        match err {
            JwtError::GenerationFailed(e) => AppError::TokenGeneration(e.to_string()),
            JwtError::Expired => AppError::token_expired("O token JWT está expirado!"),
            JwtError::Invalid(_) => AppError::authentication("Token JWT inválido!"),
        }
    }
}

impl From<crate::auth::password::PasswordError> for AppError {
    fn from(err: crate::auth::password::PasswordError) -> Self {
        AppError::Hashing(err.to_string())
    }
}

impl From<crate::mailer::MailerError> for AppError {
    fn from(err: crate::mailer::MailerError) -> Self {
        AppError::internal(err.to_string())
    }
}
