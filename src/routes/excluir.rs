use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use sqlx::{Pool, Sqlite};

use crate::db;
use crate::error::ApiError;
use crate::routes::buscar::parse_user_id;
use crate::utils::logging::log_usuario_excluido;

pub async fn excluir_usuario(
    State(pool): State<Pool<Sqlite>>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_user_id(&user_id)?;

    // Verifica se o usuário existe antes de excluir
    if db::buscar_usuario(&pool, id).await?.is_none() {
        return Err(ApiError::UsuarioNaoEncontrado(user_id));
    }

    // Se a linha sumiu entre a verificação e o DELETE, a resposta continua 204
    let linhas = db::excluir_usuario(&pool, id).await?;
    log_usuario_excluido(id, linhas);

    Ok(StatusCode::NO_CONTENT)
}
