// src/backend/alert_repo.rs

use crate::{
    backend::client::BackendClient,
    common::error::AppError,
    models::{
        alerts::{AlertEnvelope, DeleteAlertBody, MovementAlert, RestockAlert},
        session::Session,
    },
};

const INCONSISTENCY_PATH: &str = "/relatorios/alertas-movimentacao-inconsistente";
const RESTOCK_PATH: &str = "/relatorios/alertas-abastecimento-incompleto";

fn machine_filter(maquina_id: Option<i64>) -> Vec<(&'static str, String)> {
    maquina_id
        .map(|id| vec![("maquinaId", id.to_string())])
        .unwrap_or_default()
}

// Os dois fluxos de alerta gerados pelo job de detecção do backend
#[derive(Clone)]
pub struct AlertRepository {
    client: BackendClient,
}

impl AlertRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn list_inconsistencies(
        &self,
        session: &Session,
        maquina_id: Option<i64>,
    ) -> Result<Vec<MovementAlert>, AppError> {
        let envelope: AlertEnvelope<MovementAlert> = self
            .client
            .get_json(session, INCONSISTENCY_PATH, &machine_filter(maquina_id))
            .await?;
        Ok(envelope.alertas)
    }

    pub async fn list_incomplete_restocks(
        &self,
        session: &Session,
        maquina_id: Option<i64>,
    ) -> Result<Vec<RestockAlert>, AppError> {
        let envelope: AlertEnvelope<RestockAlert> = self
            .client
            .get_json(session, RESTOCK_PATH, &machine_filter(maquina_id))
            .await?;
        Ok(envelope.alertas)
    }

    // "Corrigido": apaga o alerta, sempre no escopo da máquina
    pub async fn delete_inconsistency(
        &self,
        session: &Session,
        alert_id: i64,
        maquina_id: i64,
    ) -> Result<(), AppError> {
        let path = format!("{}/{}", INCONSISTENCY_PATH, alert_id);
        self.client
            .delete(session, &path, Some(&DeleteAlertBody { maquina_id }))
            .await
    }
}
