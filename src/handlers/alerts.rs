// src/handlers/alerts.rs

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{RequireRole, RoleAdmin},
    },
    models::{alerts::AlertFeed, session::Session},
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CorrectAlertQuery {
    /// Máquina dona do alerta (o backend exige no corpo do DELETE)
    #[param(example = 7)]
    pub maquina_id: i64,
}

#[utoipa::path(
    get,
    path = "/api/alertas",
    tag = "Alertas",
    responses(
        (status = 200, description = "Feed unificado: inconsistências primeiro, depois abastecimentos incompletos", body = AlertFeed),
        (status = 502, description = "Uma das fontes de alerta falhou")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_alerts(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
) -> Result<impl IntoResponse, ApiError> {
    let feed = app_state
        .alert_feed_service
        .load_feed(&session)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(feed))
}

#[utoipa::path(
    delete,
    path = "/api/alertas/{id}",
    tag = "Alertas",
    responses(
        (status = 200, description = "Alerta corrigido; devolve o feed recarregado", body = AlertFeed),
        (status = 403, description = "Apenas administradores"),
        (status = 409, description = "Já existe uma correção em andamento nesta sessão")
    ),
    params(
        ("id" = i64, Path, description = "ID do alerta de movimentação"),
        CorrectAlertQuery
    ),
    security(("api_jwt" = []))
)]
pub async fn correct_alert(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<RoleAdmin>,
    session: Session,
    Path(alert_id): Path<i64>,
    Query(query): Query<CorrectAlertQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let feed = app_state
        .alert_feed_service
        .correct(&session, alert_id, query.maquina_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(feed))
}
