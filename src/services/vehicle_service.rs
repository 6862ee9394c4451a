// src/services/vehicle_service.rs

use chrono::NaiveDate;

use crate::{
    backend::VehicleRepository,
    common::error::AppError,
    models::{
        session::Session,
        vehicles::{VehicleAlert, VehicleMovement},
    },
};

#[derive(Clone)]
pub struct VehicleService {
    repo: VehicleRepository,
}

impl VehicleService {
    pub fn new(repo: VehicleRepository) -> Self {
        Self { repo }
    }

    pub async fn list_movements(
        &self,
        session: &Session,
        veiculo_id: i64,
        data_inicio: Option<NaiveDate>,
    ) -> Result<Vec<VehicleMovement>, AppError> {
        self.repo.list_movements(session, veiculo_id, data_inicio).await
    }

    pub async fn list_alerts(&self, session: &Session) -> Result<Vec<VehicleAlert>, AppError> {
        self.repo.list_alerts(session).await
    }

    pub async fn delete_store_stock_movement(&self, session: &Session, id: i64) -> Result<(), AppError> {
        self.repo.delete_store_stock_movement(session, id).await?;
        tracing::info!("↩️ Movimentação de estoque {} estornada por {}", id, session.subject());
        Ok(())
    }
}
