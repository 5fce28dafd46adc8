use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Sqlite};

use crate::db;
use crate::error::ApiError;
use crate::models::user::{Usuario, UsuarioPayload};
use crate::utils::logging::log_usuario_criado;

pub async fn criar_usuario(
    State(pool): State<Pool<Sqlite>>,
    payload: Result<Json<UsuarioPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Usuario>), ApiError> {
    let Json(payload) = payload?;

    let campos = payload.validar()?;

    let usuario = db::inserir_usuario(&pool, &campos).await?;
    log_usuario_criado(&usuario);

    Ok((StatusCode::CREATED, Json(usuario)))
}
