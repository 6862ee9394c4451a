// src/services/alert_feed_service.rs

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use crate::{
    backend::AlertRepository,
    common::error::AppError,
    models::{alerts::AlertFeed, session::Session},
};

/// Impede que a mesma sessão dispare duas exclusões ao mesmo tempo
/// (o clique duplo no "corrigido"). Não protege contra sessões diferentes.
#[derive(Debug, Default)]
pub struct InFlightGate {
    busy: Mutex<HashSet<String>>,
}

impl InFlightGate {
    pub fn try_acquire(&self, session: &Session) -> Result<InFlightGuard<'_>, AppError> {
        let key = session.subject().to_string();
        let mut busy = self.busy.lock().unwrap_or_else(|e| e.into_inner());
        if !busy.insert(key.clone()) {
            tracing::warn!("Exclusão duplicada bloqueada para o usuário {}", key);
            return Err(AppError::OperationInFlight);
        }
        Ok(InFlightGuard { gate: self, key })
    }

    #[cfg(test)]
    fn is_busy(&self, session: &Session) -> bool {
        self.busy
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(session.subject())
    }
}

// Libera a sessão no drop, inclusive quando a requisição é cancelada no meio.
pub struct InFlightGuard<'a> {
    gate: &'a InFlightGate,
    key: String,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.gate
            .busy
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .remove(&self.key);
    }
}

#[derive(Clone)]
pub struct AlertFeedService {
    repo: AlertRepository,
    gate: Arc<InFlightGate>,
}

impl AlertFeedService {
    pub fn new(repo: AlertRepository, gate: Arc<InFlightGate>) -> Self {
        Self { repo, gate }
    }

    /// Busca os dois fluxos em paralelo. Se qualquer um falhar, o feed inteiro falha.
    pub async fn load_feed(&self, session: &Session) -> Result<AlertFeed, AppError> {
        let (inconsistencies, restocks) = tokio::try_join!(
            self.repo.list_inconsistencies(session, None),
            self.repo.list_incomplete_restocks(session, None),
        )?;

        tracing::debug!(
            "Feed de alertas: {} inconsistências, {} abastecimentos incompletos",
            inconsistencies.len(),
            restocks.len()
        );

        Ok(AlertFeed::merge(&inconsistencies, &restocks))
    }

    /// Marca o alerta como corrigido e devolve o feed recarregado do backend.
    /// Nada é removido localmente: o que volta é exatamente o que o backend tem.
    pub async fn correct(
        &self,
        session: &Session,
        alert_id: i64,
        maquina_id: i64,
    ) -> Result<AlertFeed, AppError> {
        {
            let _guard = self.gate.try_acquire(session)?;
            self.repo
                .delete_inconsistency(session, alert_id, maquina_id)
                .await?;
        }

        tracing::info!(
            "✅ Alerta {} da máquina {} marcado como corrigido por {}",
            alert_id,
            maquina_id,
            session.subject()
        );

        self.load_feed(session).await.inspect_err(|e| {
            tracing::warn!(
                "Alerta {} já foi apagado, mas o feed não pôde ser recarregado: {}",
                alert_id,
                e
            );
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::{Claims, Role};

    fn session(sub: &str) -> Session {
        Session {
            claims: Claims {
                sub: sub.to_string(),
                nome: None,
                role: Role::Admin,
                exp: 0,
            },
            token: "t".into(),
        }
    }

    #[test]
    fn gate_blocks_second_acquire_for_same_session() {
        let gate = InFlightGate::default();
        let ana = session("1");

        let guard = gate.try_acquire(&ana).unwrap();
        assert!(gate.is_busy(&ana));
        assert!(matches!(gate.try_acquire(&ana), Err(AppError::OperationInFlight)));

        drop(guard);
        assert!(!gate.is_busy(&ana));
        assert!(gate.try_acquire(&ana).is_ok());
    }

    #[test]
    fn gate_is_per_session() {
        let gate = InFlightGate::default();
        let _a = gate.try_acquire(&session("1")).unwrap();
        assert!(gate.try_acquire(&session("2")).is_ok());
    }
}
