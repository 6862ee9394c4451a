// src/services/cash_service.rs

use anyhow::anyhow;
use serde_json::Value;
use validator::Validate;

use crate::{
    backend::{CashRepository, CatalogRepository, MachineRepository},
    common::error::AppError,
    models::{
        cash::{CashRegistrationForm, CashRegistrationPayload, EligibleMachines, VariableExpense},
        session::Session,
    },
    services::machine_policy,
};

fn non_blank(text: Option<String>) -> Option<String> {
    text.map(|t| t.trim().to_string()).filter(|t| !t.is_empty())
}

/// Valida e normaliza o formulário. Números em branco seguem como `null`.
pub fn build_payload(form: CashRegistrationForm) -> Result<CashRegistrationPayload, AppError> {
    form.validate()?;

    let (Some(loja_id), Some(inicio), Some(fim)) = (form.loja_id, form.inicio, form.fim) else {
        return Err(anyhow!("formulário validado sem loja/início/fim").into());
    };

    // Gastos variáveis só existem quando o total da loja é registrado
    let gastos_variaveis = if form.registrar_total_loja {
        form.gastos_variaveis
            .into_iter()
            .filter(|g| !g.is_blank())
            .map(|g| VariableExpense {
                loja_id,
                nome: g.nome.trim().to_string(),
                valor: g.valor,
                observacao: non_blank(g.observacao),
                data_inicio: inicio,
                data_fim: fim,
            })
            .collect()
    } else {
        Vec::new()
    };

    Ok(CashRegistrationPayload {
        loja_id,
        maquina_id: form.maquina_id,
        inicio,
        fim,
        valor_dinheiro: form.valor_dinheiro,
        valor_cartao_pix: form.valor_cartao_pix,
        observacao: non_blank(form.observacao),
        registrar_total_loja: form.registrar_total_loja,
        gastos_variaveis,
    })
}

#[derive(Clone)]
pub struct CashService {
    cash: CashRepository,
    catalog: CatalogRepository,
    machines: MachineRepository,
}

impl CashService {
    pub fn new(cash: CashRepository, catalog: CatalogRepository, machines: MachineRepository) -> Self {
        Self { cash, catalog, machines }
    }

    pub async fn eligible_machines(&self, session: &Session, loja_id: i64) -> Result<EligibleMachines, AppError> {
        let (loja, machines) = tokio::try_join!(
            self.catalog.get_store(session, loja_id),
            self.machines.list_by_store(session, loja_id),
        )?;

        let (regra, maquinas) = machine_policy::eligible_machines(&loja.nome, machines);
        Ok(EligibleMachines { loja, regra, maquinas })
    }

    pub async fn submit(&self, session: &Session, form: CashRegistrationForm) -> Result<Value, AppError> {
        let payload = build_payload(form)?;
        let created = self.cash.create_registration(session, &payload).await?;

        tracing::info!(
            "💰 Caixa registrado na loja {} ({} gastos variáveis) por {}",
            payload.loja_id,
            payload.gastos_variaveis.len(),
            session.subject()
        );
        Ok(created)
    }
}
