use axum::{extract::State, Json};
use sqlx::{Pool, Sqlite};

use crate::db;
use crate::error::ApiError;
use crate::models::user::Usuario;

pub async fn listar_usuarios(
    State(pool): State<Pool<Sqlite>>,
) -> Result<Json<Vec<Usuario>>, ApiError> {
    let usuarios = db::listar_usuarios(&pool).await?;
    Ok(Json(usuarios))
}
