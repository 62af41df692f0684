// src/usuarios.rs

use std::sync::Arc;
use uuid::Uuid;

use crate::auth::password::PasswordManager;
use crate::auth::services::AuthService;
use crate::db::models::user::{Cargo, NewUser, UpdateUser};
use crate::db::store::{UserFilter, UserStore};
use crate::dto::requests::{AtualizarUsuarioRequest, CriarUsuarioRequest, ListarUsuariosQuery};
use crate::dto::responses::{PaginaUsuariosResponse, UsuarioResponse};
use crate::error::AppError;

const DEFAULT_LIMITE: i64 = 10;
const MAX_LIMITE: i64 = 100;

/// CRUD de usuários. Como o `AuthService`, recebe a store por injeção e faz
/// trabalho bloqueante; os handlers chamam via `spawn_blocking`.
///
/// A criação sem senha delega ao fluxo de redefinição: a conta nasce sem
/// hash e o email de primeira senha sai na mesma operação.
pub struct UsuarioService {
    users: Arc<dyn UserStore>,
    auth: Arc<AuthService>,
}

impl UsuarioService {
    pub fn new(users: Arc<dyn UserStore>, auth: Arc<AuthService>) -> Self {
        Self { users, auth }
    }

    /// Lista usuários com filtros e paginação no formato do paginate.
    pub fn listar(&self, query: &ListarUsuariosQuery) -> Result<PaginaUsuariosResponse, AppError> {
        let page = parse_positive(query.page.as_deref(), "page", 1)?;
        let limite = parse_positive(query.limite.as_deref(), "limite", DEFAULT_LIMITE)?;
        if limite > MAX_LIMITE {
            return Err(AppError::validation(
                Some("limite"),
                format!("O limite máximo por página é {MAX_LIMITE}."),
            ));
        }

        if let Some(cargo) = query.cargo.as_deref() {
            validar_cargo(cargo)?;
        }

        let filter = UserFilter {
            nome: query.nome.clone(),
            email: query.email.clone(),
            cargo: query.cargo.clone(),
            page,
            limite,
        };

        let (docs, total_docs) = self.users.list(&filter)?;
        let mut total_pages = total_docs / limite;
        if total_docs % limite != 0 {
            total_pages += 1;
        }
        let total_pages = total_pages.max(1);

        Ok(PaginaUsuariosResponse {
            docs: docs.into_iter().map(UsuarioResponse::from).collect(),
            total_docs,
            total_pages,
            page,
            limite,
        })
    }

    pub fn buscar(&self, id: Uuid) -> Result<UsuarioResponse, AppError> {
        self.users
            .find_by_id(id)?
            .map(UsuarioResponse::from)
            .ok_or_else(|| AppError::not_found("Usuário não encontrado."))
    }

    /// Cria um usuário. Email duplicado é checado antes do insert para a
    /// resposta apontar o campo; o índice único continua valendo por trás.
    pub fn criar(&self, req: CriarUsuarioRequest) -> Result<UsuarioResponse, AppError> {
        validar_cargo(&req.cargo)?;

        if self.users.find_by_email(&req.email)?.is_some() {
            return Err(AppError::validation(Some("email"), "Email já cadastrado."));
        }

        let senha_hash = match req.senha.as_deref() {
            Some(senha) => {
                if !PasswordManager::is_strong(senha) {
                    return Err(AppError::weak_senha());
                }
                Some(PasswordManager::hash(senha)?)
            }
            None => None,
        };
        let sem_senha = senha_hash.is_none();

        let user = self.users.create(&NewUser {
            nome: req.nome,
            email: req.email,
            senha_hash,
            cargo: req.cargo,
        })?;

        // A conta já existe neste ponto; uma falha no fluxo de email não
        // pode desfazer a criação nem virar 500. Um novo envio sai depois
        // por /senha/recuperar.
        if sem_senha && let Err(err) = self.auth.request_password_reset(&user.email) {
            tracing::warn!(%err, "Usuário criado, mas o email de definição de senha falhou");
        }

        Ok(UsuarioResponse::from(user))
    }

    /// Atualiza nome e cargo. Email e senha nunca mudam por aqui.
    pub fn atualizar(
        &self,
        id: Uuid,
        req: AtualizarUsuarioRequest,
    ) -> Result<UsuarioResponse, AppError> {
        if self.users.find_by_id(id)?.is_none() {
            return Err(AppError::not_found("Usuário não encontrado."));
        }

        if let Some(cargo) = req.cargo.as_deref() {
            validar_cargo(cargo)?;
        }

        let user = self.users.update(
            id,
            &UpdateUser {
                nome: req.nome,
                cargo: req.cargo,
                updated_at: Some(chrono::Utc::now()),
            },
        )?;

        Ok(UsuarioResponse::from(user))
    }

    /// Remove o usuário; as sessões caem junto pelo cascade da FK.
    pub fn deletar(&self, id: Uuid) -> Result<(), AppError> {
        if self.users.find_by_id(id)?.is_none() {
            return Err(AppError::not_found("Usuário não encontrado."));
        }

        self.users.delete(id)?;
        Ok(())
    }
}

fn parse_positive(raw: Option<&str>, field: &str, default: i64) -> Result<i64, AppError> {
    let Some(raw) = raw else {
        return Ok(default);
    };

    match raw.parse::<i64>() {
        Ok(value) if value >= 1 => Ok(value),
        _ => Err(AppError::validation(
            Some(field),
            format!("O valor de '{field}' deve ser um inteiro maior ou igual a 1."),
        )),
    }
}

fn validar_cargo(cargo: &str) -> Result<(), AppError> {
    if Cargo::is_known(cargo) {
        Ok(())
    } else {
        Err(AppError::validation(
            Some("cargo"),
            "O cargo deve ser 'admin' ou 'comum'.",
        ))
    }
}
