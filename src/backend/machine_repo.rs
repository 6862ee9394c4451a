// src/backend/machine_repo.rs

use crate::{
    backend::client::BackendClient,
    common::error::AppError,
    models::{
        machines::{Machine, Movement},
        session::Session,
    },
};

#[derive(Clone)]
pub struct MachineRepository {
    client: BackendClient,
}

impl MachineRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn get_machine(&self, session: &Session, id: i64) -> Result<Machine, AppError> {
        self.client
            .get_json(session, &format!("/maquinas/{}", id), &[])
            .await
    }

    pub async fn list_by_store(
        &self,
        session: &Session,
        loja_id: i64,
    ) -> Result<Vec<Machine>, AppError> {
        self.client
            .get_json(session, "/maquinas", &[("lojaId", loja_id.to_string())])
            .await
    }

    // Histórico completo (sem paginação), do mais recente para o mais antigo
    pub async fn list_movements(
        &self,
        session: &Session,
        maquina_id: i64,
    ) -> Result<Vec<Movement>, AppError> {
        self.client
            .get_json(session, "/movimentacoes", &[("maquinaId", maquina_id.to_string())])
            .await
    }
}
