// src/services/machine_service.rs

use std::sync::Arc;

use crate::{
    backend::{AlertRepository, MachineRepository},
    common::{
        error::AppError,
        format::{format_datetime_opt, format_int_opt, format_text_opt},
    },
    models::{
        machines::{current_stock, MachineReconciliation, Movement, MovementRow},
        session::Session,
    },
    services::alert_feed_service::InFlightGate,
};

#[derive(Clone)]
pub struct MachineService {
    machines: MachineRepository,
    alerts: AlertRepository,
    gate: Arc<InFlightGate>,
}

fn movement_row(m: &Movement) -> MovementRow {
    MovementRow {
        id: m.id,
        data: format_datetime_opt(m.collected_at()),
        abastecidas: format_int_opt(m.abastecidas),
        sairam: format_int_opt(m.sairam),
        fichas: format_int_opt(m.fichas),
        total_pos: format_int_opt(m.total_pos),
        observacoes: format_text_opt(m.observacoes.as_deref()),
    }
}

impl MachineService {
    pub fn new(machines: MachineRepository, alerts: AlertRepository, gate: Arc<InFlightGate>) -> Self {
        Self { machines, alerts, gate }
    }

    /// Máquina + histórico + primeiro alerta de cada tipo, tudo em paralelo.
    pub async fn reconciliation(
        &self,
        session: &Session,
        maquina_id: i64,
    ) -> Result<MachineReconciliation, AppError> {
        let (maquina, movements, inconsistencies, restocks) = tokio::try_join!(
            self.machines.get_machine(session, maquina_id),
            self.machines.list_movements(session, maquina_id),
            self.alerts.list_inconsistencies(session, Some(maquina_id)),
            self.alerts.list_incomplete_restocks(session, Some(maquina_id)),
        )?;

        let estoque_atual = current_stock(&movements);

        Ok(MachineReconciliation {
            maquina,
            estoque_atual,
            estoque_atual_exibicao: format_int_opt(estoque_atual),
            // O filtro por máquina é do backend; se vier mais de um, mostramos o primeiro.
            alerta_movimentacao: inconsistencies.into_iter().next(),
            alerta_abastecimento: restocks.into_iter().next(),
            movimentacoes: movements.iter().map(movement_row).collect(),
        })
    }

    /// Apaga o alerta apontado por `maquina.alertaId`.
    pub async fn mark_corrected(&self, session: &Session, maquina_id: i64) -> Result<(), AppError> {
        let _guard = self.gate.try_acquire(session)?;

        let maquina = self.machines.get_machine(session, maquina_id).await?;
        let alert_id = maquina.alerta_id.ok_or(AppError::AlertIdMissing(maquina_id))?;

        self.alerts
            .delete_inconsistency(session, alert_id, maquina_id)
            .await?;

        tracing::info!(
            "✅ Máquina {} ({}) marcada como corrigida (alerta {})",
            maquina_id,
            maquina.nome,
            alert_id
        );
        Ok(())
    }
}
