use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Usuário como sai na API. Nunca carrega `senha_hash` nem os campos de
/// redefinição de senha.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UsuarioResponse {
    pub id: Uuid,
    pub nome: String,
    pub email: String,
    pub cargo: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct AccessTokenResponse {
    #[serde(rename = "accessToken")]
    pub access_token: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Página no formato do mongoose-paginate, que o front do sistema original
/// já consome: `docs` + contadores.
#[derive(Serialize, Deserialize, Debug)]
pub struct PaginaUsuariosResponse {
    pub docs: Vec<UsuarioResponse>,
    #[serde(rename = "totalDocs")]
    pub total_docs: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
    pub page: i64,
    pub limite: i64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_serializes_camel_case_tokens() {
        let response = LoginResponse {
            access_token: "acc".to_string(),
            refresh_token: "ref".to_string(),
        };

        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["accessToken"], "acc");
        assert_eq!(json["refreshToken"], "ref");
    }

    #[test]
    fn pagina_serializes_mongoose_paginate_shape() {
        let pagina = PaginaUsuariosResponse {
            docs: vec![],
            total_docs: 42,
            total_pages: 5,
            page: 2,
            limite: 10,
        };

        let json = serde_json::to_value(&pagina).expect("serialize");
        assert_eq!(json["totalDocs"], 42);
        assert_eq!(json["totalPages"], 5);
        assert!(json["docs"].as_array().expect("docs array").is_empty());
    }

    #[test]
    fn error_response_omits_field_when_absent() {
        let response = ErrorResponse {
            error: "AUTHENTICATION_ERROR".to_string(),
            message: "Email ou senha inválidos.".to_string(),
            field: None,
        };

        let json = serde_json::to_value(&response).expect("serialize");
        assert!(json.as_object().is_some_and(|o| !o.contains_key("field")));
    }
}
