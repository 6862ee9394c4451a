// src/models/alerts.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::common::{
    format::{format_datetime_opt, format_int_opt, format_text_opt},
    serde_utils::{datetime_opt, int_opt},
};

// --- Como o backend entrega ---

/// Divergência entre os contadores da máquina e as fichas/pelúcias registradas.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MovementAlert {
    #[schema(example = 17)]
    pub id: i64,

    #[schema(example = 4)]
    pub maquina_id: i64,

    #[serde(default)]
    #[schema(example = "Garra 04 TAKEBALL")]
    pub maquina_nome: Option<String>,

    #[serde(default, deserialize_with = "datetime_opt")]
    pub data_movimentacao: Option<DateTime<Utc>>,

    // O backend usa snake_case só nesses dois campos.
    #[serde(rename = "contador_out", default, deserialize_with = "int_opt")]
    pub contador_out: Option<i64>,

    #[serde(rename = "contador_in", default, deserialize_with = "int_opt")]
    pub contador_in: Option<i64>,

    #[serde(default, deserialize_with = "int_opt")]
    pub fichas: Option<i64>,

    #[serde(default, deserialize_with = "int_opt")]
    pub sairam: Option<i64>,

    #[serde(default)]
    pub mensagem: Option<String>,
}

/// Abastecimento que não levou a máquina até a capacidade padrão.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestockAlert {
    pub id: i64,

    pub maquina_id: i64,

    #[serde(default)]
    pub maquina_nome: Option<String>,

    #[serde(default)]
    #[schema(example = "abastecimento_incompleto")]
    pub tipo: Option<String>,

    #[serde(default, deserialize_with = "int_opt")]
    pub capacidade_padrao: Option<i64>,

    #[serde(default, deserialize_with = "int_opt")]
    pub total_antes: Option<i64>,

    #[serde(default, deserialize_with = "int_opt")]
    pub abastecido: Option<i64>,

    #[serde(default, deserialize_with = "int_opt")]
    pub total_depois: Option<i64>,

    #[serde(default)]
    pub observacao: Option<String>,
}

// Envelope `{ alertas: [...] }` das duas rotas de alerta
#[derive(Debug, Deserialize)]
pub struct AlertEnvelope<T> {
    #[serde(default = "Vec::new")]
    pub alertas: Vec<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAlertBody {
    pub maquina_id: i64,
}

// --- Como a view entrega ---

/// Um campo já formatado para exibição (rótulo + valor).
#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
pub struct DisplayField {
    pub rotulo: String,
    pub valor: String,
}

impl DisplayField {
    fn new(rotulo: &str, valor: String) -> Self {
        Self { rotulo: rotulo.to_string(), valor }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedAlertView {
    pub id: i64,
    pub maquina_id: i64,
    pub maquina_nome: String,
    pub detalhes: Vec<DisplayField>,
}

/// Item do feed; `tipo` define quais detalhes acompanham o alerta.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(tag = "tipo", rename_all = "snake_case")]
pub enum FeedAlert {
    MovimentacaoInconsistente(FeedAlertView),
    AbastecimentoIncompleto(FeedAlertView),
}

#[cfg(test)]
impl FeedAlert {
    fn id(&self) -> i64 {
        match self {
            FeedAlert::MovimentacaoInconsistente(v) | FeedAlert::AbastecimentoIncompleto(v) => v.id,
        }
    }

    fn view(&self) -> &FeedAlertView {
        match self {
            FeedAlert::MovimentacaoInconsistente(v) | FeedAlert::AbastecimentoIncompleto(v) => v,
        }
    }
}

impl From<&MovementAlert> for FeedAlert {
    fn from(a: &MovementAlert) -> Self {
        FeedAlert::MovimentacaoInconsistente(FeedAlertView {
            id: a.id,
            maquina_id: a.maquina_id,
            maquina_nome: format_text_opt(a.maquina_nome.as_deref()),
            detalhes: vec![
                DisplayField::new("Data", format_datetime_opt(a.data_movimentacao)),
                DisplayField::new("Contador OUT", format_int_opt(a.contador_out)),
                DisplayField::new("Contador IN", format_int_opt(a.contador_in)),
                DisplayField::new("Fichas", format_int_opt(a.fichas)),
                DisplayField::new("Saíram", format_int_opt(a.sairam)),
                DisplayField::new("Mensagem", format_text_opt(a.mensagem.as_deref())),
            ],
        })
    }
}

impl From<&RestockAlert> for FeedAlert {
    fn from(a: &RestockAlert) -> Self {
        FeedAlert::AbastecimentoIncompleto(FeedAlertView {
            id: a.id,
            maquina_id: a.maquina_id,
            maquina_nome: format_text_opt(a.maquina_nome.as_deref()),
            detalhes: vec![
                DisplayField::new("Capacidade padrão", format_int_opt(a.capacidade_padrao)),
                DisplayField::new("Total antes", format_int_opt(a.total_antes)),
                DisplayField::new("Abastecido", format_int_opt(a.abastecido)),
                DisplayField::new("Total depois", format_int_opt(a.total_depois)),
                DisplayField::new("Observação", format_text_opt(a.observacao.as_deref())),
            ],
        })
    }
}

/// Feed unificado: inconsistências primeiro, depois abastecimentos incompletos.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AlertFeed {
    pub alertas: Vec<FeedAlert>,
    pub total: usize,
}

impl AlertFeed {
    pub fn merge(inconsistencies: &[MovementAlert], restocks: &[RestockAlert]) -> Self {
        let alertas: Vec<FeedAlert> = inconsistencies
            .iter()
            .map(FeedAlert::from)
            .chain(restocks.iter().map(FeedAlert::from))
            .collect();
        let total = alertas.len();
        Self { alertas, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movement_alert(id: i64) -> MovementAlert {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "maquinaId": 4,
            "maquinaNome": "Garra 04",
            "dataMovimentacao": "2024-03-07T15:30:00.000Z",
            "contador_out": 120,
            "contador_in": "100",
            "fichas": 18,
            "sairam": null,
            "mensagem": "OUT-IN não bate com fichas"
        }))
        .unwrap()
    }

    fn restock_alert(id: i64) -> RestockAlert {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "maquinaId": 9,
            "maquinaNome": "Poltrona 01",
            "tipo": "abastecimento_incompleto",
            "capacidadePadrao": 80,
            "totalAntes": 20,
            "abastecido": 40,
            "totalDepois": 60
        }))
        .unwrap()
    }

    #[test]
    fn merge_keeps_inconsistencies_before_restocks() {
        let feed = AlertFeed::merge(&[movement_alert(1), movement_alert(2)], &[restock_alert(1)]);
        assert_eq!(feed.total, 3);
        assert!(matches!(feed.alertas[0], FeedAlert::MovimentacaoInconsistente(_)));
        assert!(matches!(feed.alertas[1], FeedAlert::MovimentacaoInconsistente(_)));
        assert!(matches!(feed.alertas[2], FeedAlert::AbastecimentoIncompleto(_)));
        assert_eq!(feed.alertas[1].id(), 2);
    }

    #[test]
    fn inconsistency_details_show_counters_and_dash_for_missing() {
        let feed = AlertFeed::merge(&[movement_alert(1)], &[]);
        let detalhes = &feed.alertas[0].view().detalhes;
        assert_eq!(detalhes[0], DisplayField::new("Data", "07/03/2024 12:30".into()));
        assert_eq!(detalhes[1].valor, "120");
        assert_eq!(detalhes[2].valor, "100");
        assert_eq!(detalhes[4].valor, "-");
    }

    #[test]
    fn restock_details_show_capacity_and_totals() {
        let feed = AlertFeed::merge(&[], &[restock_alert(5)]);
        let json = serde_json::to_value(&feed).unwrap();
        assert_eq!(json["alertas"][0]["tipo"], "abastecimento_incompleto");
        assert_eq!(json["alertas"][0]["maquinaNome"], "Poltrona 01");
        let rotulos: Vec<_> = feed.alertas[0]
            .view()
            .detalhes
            .iter()
            .map(|d| d.rotulo.as_str())
            .collect();
        assert_eq!(
            rotulos,
            ["Capacidade padrão", "Total antes", "Abastecido", "Total depois", "Observação"]
        );
    }
}
