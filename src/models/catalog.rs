// src/models/catalog.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::serde_utils::decimal_opt;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    #[schema(example = 1)]
    pub id: i64,

    #[schema(example = "Agarramais Aeroporto")]
    pub nome: String,

    #[serde(default)]
    pub endereco: Option<String>,

    #[serde(default)]
    pub ativo: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,

    #[schema(example = "Pelúcia Urso 30cm")]
    pub nome: String,

    #[serde(default)]
    pub codigo: Option<String>,

    #[serde(default)]
    pub categoria: Option<String>,

    #[serde(default, deserialize_with = "decimal_opt")]
    #[schema(value_type = Option<f64>, example = 12.9)]
    pub preco: Option<Decimal>,
}
