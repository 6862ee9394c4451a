// src/handlers/machines.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::{
        i18n::Locale,
        rbac::{RequireRole, RoleAdmin},
    },
    models::{machines::MachineReconciliation, session::Session},
};

#[utoipa::path(
    get,
    path = "/api/maquinas/{id}/reconciliacao",
    tag = "Máquinas",
    responses(
        (status = 200, description = "Máquina, estoque atual, alertas e histórico", body = MachineReconciliation),
        (status = 404, description = "Máquina não encontrada")
    ),
    params(("id" = i64, Path, description = "ID da máquina")),
    security(("api_jwt" = []))
)]
pub async fn get_reconciliation(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    Path(maquina_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    let view = app_state
        .machine_service
        .reconciliation(&session, maquina_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(view))
}

#[utoipa::path(
    post,
    path = "/api/maquinas/{id}/corrigido",
    tag = "Máquinas",
    responses(
        (status = 204, description = "Alerta da máquina removido"),
        (status = 403, description = "Apenas administradores"),
        (status = 409, description = "Já existe uma correção em andamento nesta sessão"),
        (status = 422, description = "Máquina sem alerta vinculado")
    ),
    params(("id" = i64, Path, description = "ID da máquina")),
    security(("api_jwt" = []))
)]
pub async fn mark_corrected(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<RoleAdmin>,
    session: Session,
    Path(maquina_id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .machine_service
        .mark_corrected(&session, maquina_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
