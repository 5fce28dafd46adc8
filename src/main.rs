pub mod models {
    pub mod user;
}
mod routes {
    pub mod buscar;
    pub mod criar;
    pub mod editar;
    pub mod excluir;
    pub mod listar;
}
mod app;
mod config;
mod db;
mod error;
mod utils {
    pub mod logging;
}

use tokio::net::TcpListener;
use crate::app::criar_app;
use crate::config::Config;
use crate::db::{initialize_db, resetar_banco};
use crate::utils::logging::{disable_logs, enable_logs, init_logging, log_servidor_iniciado};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let mut config = Config::from_env()?;
    // `--reset` tem o mesmo efeito de RESET_DB=true
    config.resetar_banco |= std::env::args().skip(1).any(|arg| arg == "--reset");

    if config.logs_enabled {
        enable_logs();
    } else {
        disable_logs();
    }
    init_logging();

    let pool = initialize_db(&config.database_url).await?;

    if config.resetar_banco {
        resetar_banco(&pool).await;
    }

    let app = criar_app(pool);

    let listener = TcpListener::bind(config.endereco()).await?;
    log_servidor_iniciado(&listener.local_addr()?.to_string());
    axum::serve(listener, app).await?;
    Ok(())
}
