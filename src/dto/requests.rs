use serde::Deserialize;

// -------- REQUEST DTOs --------
// Nomes de campo seguem o contrato original da API (camelCase, português).

#[derive(Deserialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String, // Plain text
}

#[derive(Deserialize, Debug, Clone)]
pub struct RefreshTokenRequest {
    #[serde(rename = "refreshToken")]
    pub refresh_token: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RevokeRequest {
    #[serde(rename = "userId")]
    pub user_id: uuid::Uuid,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RecuperarSenhaRequest {
    pub email: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct NovaSenhaRequest {
    pub senha: String,
}

/// Query de `POST /usuarios/senha`. O token chega pela URL do link enviado
/// por email; a ausência é um erro de validação, não de autenticação.
#[derive(Deserialize, Debug, Clone)]
pub struct SenhaTokenQuery {
    pub token: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct CriarUsuarioRequest {
    pub nome: String,
    pub email: String,
    /// Opcional: sem senha, a conta nasce bloqueada para login e o usuário
    /// recebe por email um link para definir a primeira senha.
    pub senha: Option<String>,
    pub cargo: String,
}

/// Somente nome e cargo podem mudar por PATCH. Email e senha ficam de fora
/// do DTO de propósito: trocam apenas pelo fluxo de redefinição.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct AtualizarUsuarioRequest {
    pub nome: Option<String>,
    pub cargo: Option<String>,
}

/// Filtros e paginação de `GET /usuarios`. Os numéricos chegam como texto
/// para que um valor malformado vire `VALIDATION_ERROR` com o campo certo,
/// em vez de uma rejeição opaca do framework.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ListarUsuariosQuery {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub cargo: Option<String>,
    pub page: Option<String>,
    pub limite: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_request_uses_portuguese_field_names() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"a@b.com","senha":"secret123"}"#).expect("parse");

        assert_eq!(req.email, "a@b.com");
        assert_eq!(req.senha, "secret123");
    }

    #[test]
    fn refresh_token_request_uses_camel_case() {
        let req: RefreshTokenRequest =
            serde_json::from_str(r#"{"refreshToken":"abc-123"}"#).expect("parse");

        assert_eq!(req.refresh_token, "abc-123");
    }

    #[test]
    fn criar_usuario_accepts_missing_senha() {
        let req: CriarUsuarioRequest = serde_json::from_str(
            r#"{"nome":"Maria","email":"maria@ifro.edu.br","cargo":"comum"}"#,
        )
        .expect("parse");

        assert!(req.senha.is_none());
    }

    #[test]
    fn atualizar_usuario_ignores_unknown_email_field_shape() {
        // Email não faz parte do DTO; um PATCH que o envie não o aplica.
        let req: AtualizarUsuarioRequest =
            serde_json::from_str(r#"{"nome":"Novo Nome"}"#).expect("parse");

        assert_eq!(req.nome.as_deref(), Some("Novo Nome"));
        assert!(req.cargo.is_none());
    }
}
