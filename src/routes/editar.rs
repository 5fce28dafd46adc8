use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use sqlx::{Pool, Sqlite};

use crate::db;
use crate::error::ApiError;
use crate::models::user::{Usuario, UsuarioPayload};
use crate::routes::buscar::parse_user_id;
use crate::utils::logging::log_usuario_editado;

pub async fn editar_usuario(
    State(pool): State<Pool<Sqlite>>,
    Path(user_id): Path<String>,
    payload: Result<Json<UsuarioPayload>, JsonRejection>,
) -> Result<Json<Usuario>, ApiError> {
    let Json(payload) = payload?;

    // Campos ausentes são rejeitados antes de olhar o id
    let campos = payload.validar()?;

    let id = parse_user_id(&user_id)?;

    match db::atualizar_usuario(&pool, id, &campos).await? {
        Some(usuario) => {
            log_usuario_editado(&usuario);
            Ok(Json(usuario))
        }
        None => Err(ApiError::UsuarioNaoEncontrado(user_id)),
    }
}
