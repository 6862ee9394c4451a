// src/models/reports.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::common::serde_utils::{date_opt, decimal_opt, decimal_or_zero, int_opt};

// Filtros do relatório de impressão. Sem `lojaId` = consolidado de todas as lojas.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ReportQuery {
    #[param(example = 1)]
    pub loja_id: Option<i64>,

    #[param(value_type = String, format = Date, example = "2024-03-01")]
    pub data_inicio: NaiveDate,

    #[param(value_type = String, format = Date, example = "2024-03-31")]
    pub data_fim: NaiveDate,
}

// --- Objeto agregado que o backend devolve ---

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriod {
    #[serde(default, deserialize_with = "date_opt")]
    pub inicio: Option<NaiveDate>,
    #[serde(default, deserialize_with = "date_opt")]
    pub fim: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub lucro_bruto_total: Decimal,
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub lucro_liquido_total: Decimal,
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub custo_total: Decimal,
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub custo_variavel_total: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreTotals {
    #[serde(default, deserialize_with = "int_opt")]
    pub loja_id: Option<i64>,
    #[serde(default)]
    pub loja_nome: String,
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub lucro_bruto: Decimal,
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub lucro_liquido: Decimal,
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub custo: Decimal,
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub custo_variavel: Decimal,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Highlight {
    #[serde(default)]
    pub nome: String,
    #[serde(default, deserialize_with = "decimal_opt")]
    pub valor: Option<Decimal>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportHighlights {
    #[serde(default)]
    pub loja_maior_lucro: Option<Highlight>,
    #[serde(default)]
    pub loja_maior_custo: Option<Highlight>,
    #[serde(default)]
    pub loja_maior_participacao: Option<Highlight>,
    #[serde(default)]
    pub produto_mais_movimentado: Option<Highlight>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeriesPoint {
    #[serde(default)]
    pub nome: String,
    #[serde(default, deserialize_with = "decimal_or_zero")]
    pub valor: Decimal,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCharts {
    #[serde(default)]
    pub ranking_lucro_bruto: Vec<SeriesPoint>,
    #[serde(default)]
    pub ranking_lucro_liquido: Vec<SeriesPoint>,
    #[serde(default)]
    pub ranking_custo: Vec<SeriesPoint>,
    #[serde(default)]
    pub participacao_percentual: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(default)]
    pub periodo: ReportPeriod,
    #[serde(default)]
    pub totais: ReportTotals,
    #[serde(default)]
    pub lojas: Vec<StoreTotals>,
    #[serde(default)]
    pub destaques: ReportHighlights,
    #[serde(default)]
    pub graficos: ReportCharts,
}

// --- View pronta para renderizar ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    Moeda,
    Percentual,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PeriodView {
    pub inicio: String,
    pub fim: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoneyView {
    #[schema(value_type = f64)]
    pub valor: Decimal,
    #[schema(example = "R$ 12.345,60")]
    pub exibicao: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TotalsView {
    pub lucro_bruto_total: MoneyView,
    pub lucro_liquido_total: MoneyView,
    pub custo_total: MoneyView,
    pub custo_variavel_total: MoneyView,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreTotalsView {
    pub loja_id: Option<i64>,
    pub loja_nome: String,
    pub lucro_bruto: String,
    pub lucro_liquido: String,
    pub custo: String,
    pub custo_variavel: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HighlightView {
    pub titulo: String,
    pub nome: String,
    pub valor: String,
}

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BarRow {
    pub nome: String,
    #[schema(value_type = f64)]
    pub valor: Decimal,
    pub exibicao: String,
    /// Largura da barra em % (mínimo 4).
    pub largura_percentual: f64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartView {
    pub chave: String,
    pub titulo: String,
    pub formato: ValueFormat,
    pub linhas: Vec<BarRow>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub periodo: PeriodView,
    pub totais: TotalsView,
    pub lojas: Vec<StoreTotalsView>,
    pub destaques: Vec<HighlightView>,
    pub graficos: Vec<ChartView>,
}
