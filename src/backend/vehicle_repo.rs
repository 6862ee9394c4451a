// src/backend/vehicle_repo.rs

use chrono::NaiveDate;

use crate::{
    backend::client::BackendClient,
    common::error::AppError,
    models::{
        session::Session,
        vehicles::{VehicleAlert, VehicleMovement},
    },
};

#[derive(Clone)]
pub struct VehicleRepository {
    client: BackendClient,
}

impl VehicleRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn list_movements(
        &self,
        session: &Session,
        veiculo_id: i64,
        data_inicio: Option<NaiveDate>,
    ) -> Result<Vec<VehicleMovement>, AppError> {
        let mut params = vec![("veiculoId", veiculo_id.to_string())];
        if let Some(data) = data_inicio {
            params.push(("dataInicio", data.format("%Y-%m-%d").to_string()));
        }
        self.client
            .get_json(session, "/movimentacao-veiculos", &params)
            .await
    }

    pub async fn list_alerts(&self, session: &Session) -> Result<Vec<VehicleAlert>, AppError> {
        self.client.get_json(session, "/alertas-veiculos", &[]).await
    }

    // Estorno de movimentação de estoque da loja (saída para veículo/máquina)
    pub async fn delete_store_stock_movement(
        &self,
        session: &Session,
        id: i64,
    ) -> Result<(), AppError> {
        self.client
            .delete(session, &format!("/movimentacao-estoque-loja/{}", id), None::<&()>)
            .await
    }
}
