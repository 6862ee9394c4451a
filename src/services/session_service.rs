// src/services/session_service.rs

use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::{
    common::error::AppError,
    models::session::{Claims, Session},
};

// Os tokens são emitidos pelo backend; aqui só conferimos assinatura e validade.
#[derive(Clone)]
pub struct SessionService {
    jwt_secret: String,
}

impl SessionService {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    pub fn open_session(&self, token: &str) -> Result<Session, AppError> {
        let validation = Validation::default();
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &validation,
        )
        .map_err(|e| {
            tracing::debug!("Token rejeitado: {}", e);
            AppError::InvalidToken
        })?;

        Ok(Session {
            claims: token_data.claims,
            token: token.to_string(),
        })
    }
}
