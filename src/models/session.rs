// src/models/session.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Funcionario,
}

// Qualquer papel desconhecido é tratado como funcionário (menor privilégio).
impl From<String> for Role {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "admin" | "administrador" => Role::Admin,
            _ => Role::Funcionario,
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        String::deserialize(deserializer).map(Role::from)
    }
}

// Estrutura de dados ("claims") dentro do JWT emitido pelo backend
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "RawClaims")]
pub struct Claims {
    pub sub: String,

    #[serde(default)]
    pub nome: Option<String>,

    #[serde(default = "default_role")]
    pub role: Role,

    pub exp: usize,
}

fn default_role() -> Role {
    Role::Funcionario
}

// Tokens antigos trazem só `id`; os novos trazem `sub` e às vezes os dois.
#[derive(Deserialize)]
struct RawClaims {
    #[serde(default)]
    sub: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    nome: Option<String>,
    #[serde(default = "default_role")]
    role: Role,
    exp: usize,
}

fn subject_text(value: Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl TryFrom<RawClaims> for Claims {
    type Error = String;

    fn try_from(raw: RawClaims) -> Result<Self, Self::Error> {
        let sub = raw
            .sub
            .and_then(subject_text)
            .or_else(|| raw.id.and_then(subject_text))
            .ok_or_else(|| "token sem 'sub' nem 'id'".to_string())?;

        Ok(Claims { sub, nome: raw.nome, role: raw.role, exp: raw.exp })
    }
}

/// Sessão da requisição: quem é o usuário e o token a repassar ao backend.
/// É passada explicitamente para cada serviço (não existe estado global de auth).
#[derive(Debug, Clone)]
pub struct Session {
    pub claims: Claims,
    pub token: String,
}

impl Session {
    pub fn subject(&self) -> &str {
        &self.claims.sub
    }

    pub fn role(&self) -> Role {
        self.claims.role
    }
}
