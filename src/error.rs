//! Erros da API e o envelope `{"message": ...}` usado em toda resposta não-2xx.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::logging::{log_campo_ausente, log_usuario_nao_encontrado};

pub const MSG_REQUISICAO_INVALIDA: &str = "Requisição do cliente inválida.";
pub const MSG_ROTA_NAO_ENCONTRADA: &str = "URI solicitada não foi encontrada.";
pub const MSG_METODO_NAO_PERMITIDO: &str = "Método não permitido pelo servidor.";
pub const MSG_ERRO_INTERNO: &str = "Erro interno no servidor aconteceu, retorne alguns minutos depois.";

#[derive(Error, Debug)]
pub enum ApiError {
    /// O detalhe vai apenas para o log; o cliente recebe a mensagem fixa.
    #[error("{}", MSG_REQUISICAO_INVALIDA)]
    RequisicaoInvalida(String),
    #[error("{}", MSG_ROTA_NAO_ENCONTRADA)]
    RotaNaoEncontrada,
    #[error("{}", MSG_METODO_NAO_PERMITIDO)]
    MetodoNaoPermitido,
    #[error("Não foi encontrado usuário com o ID {0}")]
    UsuarioNaoEncontrado(String),
    #[error("Não foi possível processar o objeto enviado: campo '{0}' ausente")]
    CampoAusente(&'static str),
    #[error("{}", MSG_ERRO_INTERNO)]
    Banco(#[from] sqlx::Error),
    #[error("{}", MSG_ERRO_INTERNO)]
    Interno,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::RequisicaoInvalida(_) => StatusCode::BAD_REQUEST,
            ApiError::RotaNaoEncontrada | ApiError::UsuarioNaoEncontrado(_) => StatusCode::NOT_FOUND,
            ApiError::MetodoNaoPermitido => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::CampoAusente(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Banco(_) | ApiError::Interno => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Erro genérico para um status produzido fora dos handlers (rejeições do axum,
    /// 405 do roteador). `None` para status que já chegam tratados.
    pub fn para_status(status: StatusCode) -> Option<ApiError> {
        match status {
            StatusCode::BAD_REQUEST => Some(ApiError::RequisicaoInvalida(String::new())),
            StatusCode::NOT_FOUND => Some(ApiError::RotaNaoEncontrada),
            StatusCode::METHOD_NOT_ALLOWED => Some(ApiError::MetodoNaoPermitido),
            StatusCode::INTERNAL_SERVER_ERROR => Some(ApiError::Interno),
            _ => None,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::RequisicaoInvalida(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Banco(e) => error!("[DB] Erro no banco de dados: {}", e),
            ApiError::RequisicaoInvalida(detalhe) if !detalhe.is_empty() => {
                warn!("[USUARIOS] Requisição inválida: {}", detalhe)
            }
            ApiError::CampoAusente(campo) => log_campo_ausente(campo),
            ApiError::UsuarioNaoEncontrado(id) => log_usuario_nao_encontrado(id),
            _ => {}
        }

        let body = ErrorBody {
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
