use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;
use env_logger::Env;
use log::{info, warn};

use crate::models::user::Usuario;

static LOG_ENABLED: AtomicBool = AtomicBool::new(true);
static INIT: Once = Once::new();

/// Inicializa o logger, se ainda não foi inicializado.
pub fn init_logging() {
    INIT.call_once(|| {
        if LOG_ENABLED.load(Ordering::Relaxed) {
            env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
        }
    });
}

/// Ativa os logs (chame antes de init_logging).
pub fn enable_logs() {
    LOG_ENABLED.store(true, Ordering::Relaxed);
}

/// Desativa os logs (chame antes de init_logging).
pub fn disable_logs() {
    LOG_ENABLED.store(false, Ordering::Relaxed);
}

pub fn log_servidor_iniciado(endereco: &str) {
    info!("[USUARIOS] API rodando no endereço http://{}", endereco);
}

pub fn log_tabela_recriada() {
    info!("[DB] Tabela users recriada com sucesso");
}

pub fn log_falha_resetar_banco(erro: &sqlx::Error) {
    warn!("[DB] Falha ao resetar o banco de dados: {}", erro);
}

pub fn log_usuario_exemplo(usuario: &Usuario) {
    info!("[DB] Usuário de exemplo inserido: {:?}", usuario);
}

pub fn log_usuario_criado(usuario: &Usuario) {
    info!("[USUARIOS] Usuário {} criado ({})", usuario.user_id, usuario.email);
}

pub fn log_usuario_editado(usuario: &Usuario) {
    info!("[USUARIOS] Usuário {} editado", usuario.user_id);
}

pub fn log_usuario_excluido(user_id: i64, linhas: u64) {
    info!("[USUARIOS] Exclusão do usuário {} concluída, linhas afetadas: {}", user_id, linhas);
}

pub fn log_usuario_nao_encontrado(user_id: &str) {
    warn!("[USUARIOS] Usuário {} não encontrado", user_id);
}

pub fn log_campo_ausente(campo: &str) {
    warn!("[USUARIOS] Objeto enviado sem o campo obrigatório '{}'", campo);
}
