// src/backend/cash_repo.rs

use serde_json::Value;

use crate::{
    backend::client::BackendClient,
    common::error::AppError,
    models::{cash::CashRegistrationPayload, session::Session},
};

#[derive(Clone)]
pub struct CashRepository {
    client: BackendClient,
}

impl CashRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    // O registro criado volta como o backend montou (inclui os gastos variáveis gravados)
    pub async fn create_registration(
        &self,
        session: &Session,
        payload: &CashRegistrationPayload,
    ) -> Result<Value, AppError> {
        self.client
            .post_json(session, "/registros-dinheiro", payload)
            .await
    }
}
