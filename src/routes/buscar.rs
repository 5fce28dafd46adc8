use axum::{
    extract::{Path, State},
    Json,
};
use sqlx::{Pool, Sqlite};

use crate::db;
use crate::error::ApiError;
use crate::models::user::Usuario;

/// Converte o segmento `{id}` da rota. Um id que não é inteiro não casa com
/// nenhuma linha, então vira 404 com o valor recebido na mensagem.
pub fn parse_user_id(bruto: &str) -> Result<i64, ApiError> {
    bruto
        .trim()
        .parse::<i64>()
        .map_err(|_| ApiError::UsuarioNaoEncontrado(bruto.to_string()))
}

pub async fn buscar_usuario(
    State(pool): State<Pool<Sqlite>>,
    Path(user_id): Path<String>,
) -> Result<Json<Usuario>, ApiError> {
    let id = parse_user_id(&user_id)?;

    db::buscar_usuario(&pool, id)
        .await?
        .map(Json)
        .ok_or(ApiError::UsuarioNaoEncontrado(user_id))
}
