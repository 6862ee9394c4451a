// src/models/vehicles.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::common::serde_utils::{datetime_opt, int_opt};

#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VehicleMovementQuery {
    #[param(value_type = Option<String>, format = Date, example = "2024-03-01")]
    pub data_inicio: Option<NaiveDate>,
}

/// Retirada/devolução de veículo (diário de bordo).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleMovement {
    pub id: i64,

    #[serde(default, deserialize_with = "int_opt")]
    pub veiculo_id: Option<i64>,

    #[serde(default)]
    #[schema(example = "retirada")]
    pub tipo: Option<String>,

    #[serde(default, deserialize_with = "datetime_opt")]
    pub data_hora: Option<DateTime<Utc>>,

    #[serde(default, deserialize_with = "int_opt")]
    pub km: Option<i64>,

    #[serde(default)]
    pub nivel_combustivel: Option<String>,

    #[serde(default)]
    pub modo: Option<String>,

    #[serde(default)]
    pub observacao: Option<String>,

    #[serde(default)]
    pub usuario_nome: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VehicleAlert {
    pub id: i64,

    #[serde(default, deserialize_with = "int_opt")]
    pub veiculo_id: Option<i64>,

    #[serde(default)]
    pub veiculo_nome: Option<String>,

    #[serde(default)]
    #[schema(example = "revisao")]
    pub tipo: Option<String>,

    #[serde(default)]
    pub mensagem: Option<String>,

    #[serde(default, deserialize_with = "datetime_opt")]
    pub data: Option<DateTime<Utc>>,
}
