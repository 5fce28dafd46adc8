use std::env;
use std::net::{Ipv4Addr, SocketAddr};
use thiserror::Error;

const PORTA_PADRAO: u16 = 8080;
const DATABASE_URL_PADRAO: &str = "sqlite:database.db";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("PORT inválida: '{0}'")]
    PortaInvalida(String),
    #[error("valor booleano inválido para {variavel}: '{valor}'")]
    BooleanoInvalido { variavel: &'static str, valor: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub porta: u16,
    pub database_url: String,
    /// Apaga e recria a tabela `users` e insere os usuários de exemplo.
    pub resetar_banco: bool,
    pub logs_enabled: bool,
}

impl Config {
    /// Lê as variáveis do processo (o `.env` já deve ter sido carregado).
    pub fn from_env() -> Result<Config, ConfigError> {
        Self::from_lookup(|nome| env::var(nome).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let porta = match lookup("PORT") {
            Some(valor) => valor
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::PortaInvalida(valor.clone()))?,
            None => PORTA_PADRAO,
        };

        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DATABASE_URL_PADRAO.to_string());

        Ok(Config {
            porta,
            database_url,
            resetar_banco: parse_bool("RESET_DB", lookup("RESET_DB"), false)?,
            logs_enabled: parse_bool("LOGS_ENABLED", lookup("LOGS_ENABLED"), true)?,
        })
    }

    /// Todas as interfaces, na porta configurada.
    pub fn endereco(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.porta))
    }
}

fn parse_bool(variavel: &'static str, valor: Option<String>, padrao: bool) -> Result<bool, ConfigError> {
    let Some(valor) = valor else {
        return Ok(padrao);
    };
    match valor.trim().to_lowercase().as_str() {
        "" => Ok(padrao),
        "1" | "true" | "yes" | "sim" | "on" => Ok(true),
        "0" | "false" | "no" | "nao" | "não" | "off" => Ok(false),
        _ => Err(ConfigError::BooleanoInvalido { variavel, valor }),
    }
}
