// src/models/machines.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    common::serde_utils::{datetime_opt, decimal_opt, int_opt},
    models::alerts::{MovementAlert, RestockAlert},
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Machine {
    #[schema(example = 4)]
    pub id: i64,

    #[schema(example = "Garra 04 TAKEBALL")]
    pub nome: String,

    #[serde(default)]
    pub codigo: Option<String>,

    #[serde(default, deserialize_with = "int_opt")]
    pub loja_id: Option<i64>,

    #[serde(default, deserialize_with = "int_opt")]
    pub capacidade_padrao: Option<i64>,

    #[serde(default, deserialize_with = "decimal_opt")]
    #[schema(value_type = Option<f64>, example = 2.5)]
    pub valor_ficha: Option<Decimal>,

    // Alerta pendente desta máquina (usado pelo "marcar como corrigido")
    #[serde(default, deserialize_with = "int_opt")]
    pub alerta_id: Option<i64>,
}

/// Uma coleta/abastecimento. O backend entrega do mais recente para o mais antigo.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Movement {
    pub id: i64,

    #[serde(default, deserialize_with = "int_opt")]
    pub maquina_id: Option<i64>,

    #[serde(default, deserialize_with = "datetime_opt")]
    pub data_coleta: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "datetime_opt")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "int_opt")]
    pub abastecidas: Option<i64>,

    #[serde(default, deserialize_with = "int_opt")]
    pub sairam: Option<i64>,

    #[serde(default, deserialize_with = "int_opt")]
    pub fichas: Option<i64>,

    // Registros antigos usam `total_pos` ou `totalpos`.
    #[serde(default, alias = "total_pos", alias = "totalpos", deserialize_with = "int_opt")]
    pub total_pos: Option<i64>,

    #[serde(default)]
    pub observacoes: Option<String>,
}

impl Movement {
    /// Data da coleta, caindo para a data de criação do registro.
    pub fn collected_at(&self) -> Option<DateTime<Utc>> {
        self.data_coleta.or(self.created_at)
    }
}

/// Estoque atual = `totalPos` da movimentação mais recente (índice 0; não reordenamos).
pub fn current_stock(movements: &[Movement]) -> Option<i64> {
    movements.first().and_then(|m| m.total_pos)
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovementRow {
    pub id: i64,
    pub data: String,
    pub abastecidas: String,
    pub sairam: String,
    pub fichas: String,
    pub total_pos: String,
    pub observacoes: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MachineReconciliation {
    pub maquina: Machine,
    pub estoque_atual: Option<i64>,
    pub estoque_atual_exibicao: String,
    pub alerta_movimentacao: Option<MovementAlert>,
    pub alerta_abastecimento: Option<RestockAlert>,
    pub movimentacoes: Vec<MovementRow>,
}
