//! Montagem do roteador: rotas de usuários, 404 para rotas desconhecidas,
//! envelope JSON para erros gerados fora dos handlers e 500 para pânicos.

use std::any::Any;

use axum::{
    http::{header::CONTENT_TYPE, StatusCode},
    middleware::map_response,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use log::error;
use sqlx::{Pool, Sqlite};
use tower_http::catch_panic::CatchPanicLayer;

use crate::error::ApiError;
use crate::routes::{
    buscar::buscar_usuario,
    criar::criar_usuario,
    editar::editar_usuario,
    excluir::excluir_usuario,
    listar::listar_usuarios,
};

pub fn rotas_usuarios() -> Router<Pool<Sqlite>> {
    Router::new()
        .route("/users", get(listar_usuarios).post(criar_usuario))
        .route(
            "/users/:user_id",
            get(buscar_usuario).put(editar_usuario).delete(excluir_usuario),
        )
}

/// Roteador completo. As mesmas rotas respondem na raiz e sob `/api`.
pub fn criar_app(pool: Pool<Sqlite>) -> Router {
    let usuarios = rotas_usuarios();

    let rotas = Router::new()
        .merge(usuarios.clone())
        .nest("/api", usuarios)
        .with_state(pool);

    aplicar_tratamento_de_erros(rotas)
}

pub fn aplicar_tratamento_de_erros(router: Router) -> Router {
    router
        .fallback(rota_nao_encontrada)
        .layer(map_response(padronizar_erros))
        .layer(CatchPanicLayer::custom(tratar_panico))
}

async fn rota_nao_encontrada() -> ApiError {
    ApiError::RotaNaoEncontrada
}

/// Respostas de erro que não saíram de um `ApiError` (405 do roteador,
/// rejeições de extractors) ganham o envelope padrão do seu status.
async fn padronizar_erros(response: Response) -> Response {
    let ja_e_json = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|valor| valor.to_str().ok())
        .map(|valor| valor.starts_with("application/json"))
        .unwrap_or(false);

    if ja_e_json {
        return response;
    }

    match ApiError::para_status(response.status()) {
        Some(erro) => erro.into_response(),
        None => response,
    }
}

fn tratar_panico(erro: Box<dyn Any + Send + 'static>) -> Response {
    let detalhe = if let Some(texto) = erro.downcast_ref::<String>() {
        texto.as_str()
    } else if let Some(texto) = erro.downcast_ref::<&str>() {
        *texto
    } else {
        "sem detalhes"
    };
    error!("[USUARIOS] Pânico ao tratar a requisição: {}", detalhe);

    ApiError::Interno.into_response()
}
