// src/handlers/cash.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::{
        cash::{CashRegistrationForm, EligibleMachines},
        session::Session,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct StoreQuery {
    #[param(example = 1)]
    pub loja_id: i64,
}

#[utoipa::path(
    get,
    path = "/api/caixa/maquinas-elegiveis",
    tag = "Caixa",
    responses(
        (status = 200, description = "Máquinas que podem receber registro de caixa nesta loja", body = EligibleMachines),
        (status = 404, description = "Loja não encontrada")
    ),
    params(StoreQuery),
    security(("api_jwt" = []))
)]
pub async fn list_eligible_machines(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    Query(query): Query<StoreQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let eligible = app_state
        .cash_service
        .eligible_machines(&session, query.loja_id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(eligible))
}

#[utoipa::path(
    post,
    path = "/api/caixa",
    tag = "Caixa",
    request_body = CashRegistrationForm,
    responses(
        (status = 201, description = "Registro de caixa criado no backend"),
        (status = 422, description = "Loja ou período ausentes")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_cash_registration(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    Json(form): Json<CashRegistrationForm>,
) -> Result<impl IntoResponse, ApiError> {
    let created = app_state
        .cash_service
        .submit(&session, form)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok((StatusCode::CREATED, Json(created)))
}
