// src/models/cash.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::serde_utils::{datetime_opt, decimal_opt, int_opt},
    models::{catalog::Store, machines::Machine},
};

// ---
// Formulário: como chega do navegador
// ---

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariableExpenseInput {
    #[serde(default)]
    #[schema(example = "Manutenção da garra")]
    pub nome: String,

    #[serde(default, deserialize_with = "decimal_opt")]
    #[schema(value_type = Option<f64>, example = 35.9)]
    pub valor: Option<Decimal>,

    #[serde(default)]
    pub observacao: Option<String>,
}

impl VariableExpenseInput {
    pub fn is_blank(&self) -> bool {
        self.nome.trim().is_empty()
            && self.valor.is_none()
            && self.observacao.as_deref().map_or(true, |o| o.trim().is_empty())
    }
}

/// Campos numéricos em branco chegam como `""` ou `null` e ficam `None`.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashRegistrationForm {
    #[validate(required(message = "Selecione a loja."))]
    #[serde(default, deserialize_with = "int_opt")]
    #[schema(value_type = Option<i64>, example = 1)]
    pub loja_id: Option<i64>,

    #[serde(default, deserialize_with = "int_opt")]
    pub maquina_id: Option<i64>,

    #[validate(required(message = "Informe o início do período."))]
    #[serde(default, deserialize_with = "datetime_opt")]
    #[schema(value_type = Option<String>, example = "2024-03-07T08:00")]
    pub inicio: Option<DateTime<Utc>>,

    #[validate(required(message = "Informe o fim do período."))]
    #[serde(default, deserialize_with = "datetime_opt")]
    #[schema(value_type = Option<String>, example = "2024-03-07T22:00")]
    pub fim: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "decimal_opt")]
    #[schema(value_type = Option<f64>)]
    pub valor_dinheiro: Option<Decimal>,

    #[serde(default, deserialize_with = "decimal_opt")]
    #[schema(value_type = Option<f64>)]
    pub valor_cartao_pix: Option<Decimal>,

    #[serde(default)]
    pub observacao: Option<String>,

    #[serde(default)]
    pub registrar_total_loja: bool,

    #[serde(default)]
    pub gastos_variaveis: Vec<VariableExpenseInput>,
}

// ---
// Payload: como vai para o backend (nulls explícitos, nada de 0 ou "")
// ---

/// Linha da tabela `GastoVariavel`.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VariableExpense {
    pub loja_id: i64,
    pub nome: String,
    pub valor: Option<Decimal>,
    pub observacao: Option<String>,
    pub data_inicio: DateTime<Utc>,
    pub data_fim: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CashRegistrationPayload {
    pub loja_id: i64,
    pub maquina_id: Option<i64>,
    pub inicio: DateTime<Utc>,
    pub fim: DateTime<Utc>,
    pub valor_dinheiro: Option<Decimal>,
    pub valor_cartao_pix: Option<Decimal>,
    pub observacao: Option<String>,
    pub registrar_total_loja: bool,
    pub gastos_variaveis: Vec<VariableExpense>,
}

// ---
// Máquinas elegíveis para o seletor do formulário
// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityRule {
    /// Loja de aeroporto: todas as máquinas.
    TodasAsMaquinas,
    /// Demais lojas: só TAKEBALL e poltronas.
    TakeballOuPoltrona,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EligibleMachines {
    pub loja: Store,
    pub regra: EligibilityRule,
    pub maquinas: Vec<Machine>,
}
