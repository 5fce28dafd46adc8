use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::error::ApiError;

/// Registro persistido na tabela `users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Usuario {
    pub user_id: i64,
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub endereco: String,
    pub cidade: String,
}

/// Corpo recebido em POST e PUT. Campos ausentes (ou `null`) ficam em `None`
/// e são rejeitados por `validar`. Um `user_id` no corpo é ignorado.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UsuarioPayload {
    pub nome: Option<String>,
    pub email: Option<String>,
    pub telefone: Option<String>,
    pub endereco: Option<String>,
    pub cidade: Option<String>,
}

/// Os cinco campos obrigatórios, todos presentes. Só existe depois de `validar`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CamposUsuario {
    pub nome: String,
    pub email: String,
    pub telefone: String,
    pub endereco: String,
    pub cidade: String,
}

fn obrigatorio(valor: Option<String>, campo: &'static str) -> Result<String, ApiError> {
    valor.ok_or(ApiError::CampoAusente(campo))
}

impl UsuarioPayload {
    pub fn validar(self) -> Result<CamposUsuario, ApiError> {
        Ok(CamposUsuario {
            nome: obrigatorio(self.nome, "nome")?,
            email: obrigatorio(self.email, "email")?,
            telefone: obrigatorio(self.telefone, "telefone")?,
            endereco: obrigatorio(self.endereco, "endereco")?,
            cidade: obrigatorio(self.cidade, "cidade")?,
        })
    }
}

impl CamposUsuario {
    pub fn new(nome: &str, email: &str, telefone: &str, endereco: &str, cidade: &str) -> Self {
        Self {
            nome: nome.to_string(),
            email: email.to_string(),
            telefone: telefone.to_string(),
            endereco: endereco.to_string(),
            cidade: cidade.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_completo_vira_campos() {
        let payload: UsuarioPayload = serde_json::from_str(
            r#"{"nome":"A","email":"a@x.com","telefone":"1","endereco":"S","cidade":"C","user_id":77}"#,
        )
        .unwrap();

        let campos = payload.validar().unwrap();
        assert_eq!(campos, CamposUsuario::new("A", "a@x.com", "1", "S", "C"));
    }

    #[test]
    fn campo_ausente_e_rejeitado() {
        let payload: UsuarioPayload =
            serde_json::from_str(r#"{"nome":"A","email":"a@x.com","endereco":"S","cidade":"C"}"#).unwrap();

        match payload.validar() {
            Err(ApiError::CampoAusente(campo)) => assert_eq!(campo, "telefone"),
            outro => panic!("esperava CampoAusente, veio {:?}", outro),
        }
    }

    #[test]
    fn campo_nulo_conta_como_ausente() {
        let payload: UsuarioPayload = serde_json::from_str(
            r#"{"nome":null,"email":"a@x.com","telefone":"1","endereco":"S","cidade":"C"}"#,
        )
        .unwrap();

        assert!(matches!(payload.validar(), Err(ApiError::CampoAusente("nome"))));
    }

    #[test]
    fn string_vazia_e_aceita() {
        let payload = UsuarioPayload {
            nome: Some(String::new()),
            email: Some(String::new()),
            telefone: Some(String::new()),
            endereco: Some(String::new()),
            cidade: Some(String::new()),
        };

        assert!(payload.validar().is_ok());
    }
}
