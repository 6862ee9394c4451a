// src/backend/report_repo.rs

use crate::{
    backend::client::BackendClient,
    common::error::AppError,
    models::{
        reports::{Report, ReportQuery},
        session::Session,
    },
};

#[derive(Clone)]
pub struct ReportRepository {
    client: BackendClient,
}

impl ReportRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn get_print_report(
        &self,
        session: &Session,
        query: &ReportQuery,
    ) -> Result<Report, AppError> {
        let mut params = vec![
            ("dataInicio", query.data_inicio.format("%Y-%m-%d").to_string()),
            ("dataFim", query.data_fim.format("%Y-%m-%d").to_string()),
        ];
        if let Some(loja_id) = query.loja_id {
            params.push(("lojaId", loja_id.to_string()));
        }
        self.client
            .get_json(session, "/relatorios/impressao", &params)
            .await
    }
}
