use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use log::info;

use crate::models::user::{CamposUsuario, Usuario};
use crate::utils::logging::{log_falha_resetar_banco, log_tabela_recriada, log_usuario_exemplo};

const CRIAR_TABELA_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    user_id INTEGER PRIMARY KEY AUTOINCREMENT NOT NULL,
    nome TEXT NOT NULL,
    email TEXT NOT NULL,
    telefone TEXT NOT NULL,
    endereco TEXT NOT NULL,
    cidade TEXT NOT NULL
)";

const SELECT_USUARIO: &str = "SELECT user_id, nome, email, telefone, endereco, cidade FROM users";

pub async fn initialize_db(database_url: &str) -> Result<Pool<Sqlite>, sqlx::Error> {
    info!("[DB] Conectando ao banco de dados: {}", database_url);

    // Cria o arquivo do banco, se não existir
    let opcoes = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opcoes)
        .await?;

    criar_tabela(&pool).await?;
    Ok(pool)
}

/// Cria a tabela `users` apenas se ela ainda não existir.
pub async fn criar_tabela(pool: &Pool<Sqlite>) -> Result<(), sqlx::Error> {
    sqlx::query(CRIAR_TABELA_USERS).execute(pool).await?;
    Ok(())
}

/// Apaga a tabela `users` (e todos os dados) e a cria de novo.
pub async fn recriar_tabela(pool: &Pool<Sqlite>) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query("DROP TABLE IF EXISTS users")
        .execute(&mut *tx)
        .await?;

    sqlx::query(CRIAR_TABELA_USERS)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(())
}

pub fn usuarios_exemplo() -> Vec<CamposUsuario> {
    vec![
        CamposUsuario::new("Charles Effiong", "charles@gamil.com", "067765665656", "Lui Str, Innsbruck", "Austria"),
        CamposUsuario::new("Sam Adebanjo", "samadebanjo@gamil.com", "098765465", "Sam Str, Vienna", "Austria"),
        CamposUsuario::new("John Doe", "johndoe@gamil.com", "067765665656", "John Str, Linz", "Austria"),
        CamposUsuario::new("Mary James", "maryjames@gamil.com", "09878766676", "AYZ Str, New york", "United states"),
    ]
}

/// Recria a tabela e insere os usuários de exemplo. Só roda quando pedido
/// explicitamente; uma falha é registrada no log e o servidor segue.
pub async fn resetar_banco(pool: &Pool<Sqlite>) -> Vec<Usuario> {
    if let Err(e) = recriar_tabela(pool).await {
        log_falha_resetar_banco(&e);
        return Vec::new();
    }
    log_tabela_recriada();

    let mut inseridos = Vec::new();
    for campos in usuarios_exemplo() {
        match inserir_usuario(pool, &campos).await {
            Ok(usuario) => {
                log_usuario_exemplo(&usuario);
                inseridos.push(usuario);
            }
            Err(e) => log_falha_resetar_banco(&e),
        }
    }
    inseridos
}

/// Insere o usuário e devolve o registro relido do banco, com o `user_id` gerado.
pub async fn inserir_usuario(pool: &Pool<Sqlite>, campos: &CamposUsuario) -> Result<Usuario, sqlx::Error> {
    // Qualquer erro antes do commit descarta a transação (rollback no drop)
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO users (nome, email, telefone, endereco, cidade) VALUES (?, ?, ?, ?, ?)"
    )
    .bind(&campos.nome)
    .bind(&campos.email)
    .bind(&campos.telefone)
    .bind(&campos.endereco)
    .bind(&campos.cidade)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    buscar_usuario(pool, result.last_insert_rowid())
        .await?
        .ok_or(sqlx::Error::RowNotFound)
}

pub async fn listar_usuarios(pool: &Pool<Sqlite>) -> Result<Vec<Usuario>, sqlx::Error> {
    sqlx::query_as::<_, Usuario>(&format!("{} ORDER BY user_id", SELECT_USUARIO))
        .fetch_all(pool)
        .await
}

/// `Ok(None)` quando nenhuma linha tem o id; `Err` apenas para falhas do banco.
pub async fn buscar_usuario(pool: &Pool<Sqlite>, user_id: i64) -> Result<Option<Usuario>, sqlx::Error> {
    sqlx::query_as::<_, Usuario>(&format!("{} WHERE user_id = ?", SELECT_USUARIO))
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Reescreve todos os campos do usuário e devolve o registro relido.
/// Se o id não existir nada é alterado e o retorno é `Ok(None)`.
pub async fn atualizar_usuario(
    pool: &Pool<Sqlite>,
    user_id: i64,
    campos: &CamposUsuario,
) -> Result<Option<Usuario>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    sqlx::query(
        "UPDATE users SET nome = ?, email = ?, telefone = ?, endereco = ?, cidade = ? WHERE user_id = ?"
    )
    .bind(&campos.nome)
    .bind(&campos.email)
    .bind(&campos.telefone)
    .bind(&campos.endereco)
    .bind(&campos.cidade)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    buscar_usuario(pool, user_id).await
}

/// Devolve o número de linhas removidas (0 ou 1).
pub async fn excluir_usuario(pool: &Pool<Sqlite>, user_id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Banco em memória com uma única conexão, para que todas as operações
/// enxerguem a mesma base.
#[cfg(test)]
pub async fn pool_em_memoria() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    criar_tabela(&pool).await.unwrap();
    pool
}

#[cfg(test)]
mod tests {
    use super::*;

    fn campos(nome: &str) -> CamposUsuario {
        CamposUsuario::new(nome, "a@x.com", "1", "S", "C")
    }

    #[tokio::test]
    async fn inserir_devolve_registro_com_id() {
        let pool = pool_em_memoria().await;

        let usuario = inserir_usuario(&pool, &campos("A")).await.unwrap();

        assert!(usuario.user_id > 0);
        assert_eq!(usuario.nome, "A");
        assert_eq!(usuario.email, "a@x.com");
        assert_eq!(usuario.telefone, "1");
        assert_eq!(usuario.endereco, "S");
        assert_eq!(usuario.cidade, "C");
        assert_eq!(buscar_usuario(&pool, usuario.user_id).await.unwrap(), Some(usuario));
    }

    #[tokio::test]
    async fn ids_nunca_sao_reutilizados() {
        let pool = pool_em_memoria().await;

        let primeiro = inserir_usuario(&pool, &campos("A")).await.unwrap();
        let segundo = inserir_usuario(&pool, &campos("B")).await.unwrap();
        excluir_usuario(&pool, segundo.user_id).await.unwrap();
        let terceiro = inserir_usuario(&pool, &campos("C")).await.unwrap();

        assert_ne!(primeiro.user_id, segundo.user_id);
        assert!(terceiro.user_id > segundo.user_id);
    }

    #[tokio::test]
    async fn listar_reflete_insercoes_e_exclusoes() {
        let pool = pool_em_memoria().await;
        assert!(listar_usuarios(&pool).await.unwrap().is_empty());

        let a = inserir_usuario(&pool, &campos("A")).await.unwrap();
        let b = inserir_usuario(&pool, &campos("B")).await.unwrap();
        inserir_usuario(&pool, &campos("C")).await.unwrap();
        excluir_usuario(&pool, b.user_id).await.unwrap();

        let usuarios = listar_usuarios(&pool).await.unwrap();
        assert_eq!(usuarios.len(), 2);
        assert_eq!(usuarios[0], a);
        assert_eq!(usuarios[1].nome, "C");
    }

    #[tokio::test]
    async fn buscar_id_inexistente() {
        let pool = pool_em_memoria().await;
        assert_eq!(buscar_usuario(&pool, 999_999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn atualizar_reescreve_todos_os_campos() {
        let pool = pool_em_memoria().await;
        let criado = inserir_usuario(&pool, &campos("A")).await.unwrap();

        let novos = CamposUsuario::new("B", "b@x.com", "2", "Rua B", "Cidade B");
        let atualizado = atualizar_usuario(&pool, criado.user_id, &novos).await.unwrap().unwrap();

        assert_eq!(
            atualizado,
            Usuario {
                user_id: criado.user_id,
                nome: "B".into(),
                email: "b@x.com".into(),
                telefone: "2".into(),
                endereco: "Rua B".into(),
                cidade: "Cidade B".into(),
            }
        );
        assert_eq!(buscar_usuario(&pool, criado.user_id).await.unwrap(), Some(atualizado));
    }

    #[tokio::test]
    async fn atualizar_id_inexistente_nao_cria_linha() {
        let pool = pool_em_memoria().await;

        let resultado = atualizar_usuario(&pool, 42, &campos("X")).await.unwrap();

        assert_eq!(resultado, None);
        assert!(listar_usuarios(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn excluir_informa_linhas_afetadas() {
        let pool = pool_em_memoria().await;
        let usuario = inserir_usuario(&pool, &campos("A")).await.unwrap();

        assert_eq!(excluir_usuario(&pool, usuario.user_id).await.unwrap(), 1);
        assert_eq!(excluir_usuario(&pool, usuario.user_id).await.unwrap(), 0);
        assert_eq!(buscar_usuario(&pool, usuario.user_id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn resetar_apaga_dados_e_insere_exemplos() {
        let pool = pool_em_memoria().await;
        inserir_usuario(&pool, &campos("Antigo")).await.unwrap();

        let inseridos = resetar_banco(&pool).await;

        let usuarios = listar_usuarios(&pool).await.unwrap();
        assert_eq!(inseridos.len(), 4);
        assert_eq!(usuarios, inseridos);
        assert_eq!(usuarios[0].user_id, 1);
        assert_eq!(usuarios[0].nome, "Charles Effiong");
        assert_eq!(usuarios[3].cidade, "United states");
    }

    #[tokio::test]
    async fn criar_tabela_preserva_dados() {
        let pool = pool_em_memoria().await;
        inserir_usuario(&pool, &campos("A")).await.unwrap();

        criar_tabela(&pool).await.unwrap();

        assert_eq!(listar_usuarios(&pool).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn falha_do_banco_nao_vira_ausencia() {
        let pool = pool_em_memoria().await;
        sqlx::query("DROP TABLE users").execute(&pool).await.unwrap();

        assert!(buscar_usuario(&pool, 1).await.is_err());
        assert!(listar_usuarios(&pool).await.is_err());
        assert!(inserir_usuario(&pool, &campos("A")).await.is_err());
    }
}
