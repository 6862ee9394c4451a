// src/handlers/vehicles.rs

use axum::{
    extract::{Path, Query, State},
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
    models::{
        session::Session,
        vehicles::{VehicleAlert, VehicleMovement, VehicleMovementQuery},
    },
};

#[utoipa::path(
    get,
    path = "/api/veiculos/{id}/movimentacoes",
    tag = "Veículos",
    responses((status = 200, description = "Diário de bordo do veículo", body = Vec<VehicleMovement>)),
    params(
        ("id" = i64, Path, description = "ID do veículo"),
        VehicleMovementQuery
    ),
    security(("api_jwt" = []))
)]
pub async fn list_vehicle_movements(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    Path(veiculo_id): Path<i64>,
    Query(query): Query<VehicleMovementQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let movements = app_state
        .vehicle_service
        .list_movements(&session, veiculo_id, query.data_inicio)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(movements))
}

#[utoipa::path(
    get,
    path = "/api/alertas-veiculos",
    tag = "Veículos",
    responses((status = 200, description = "Alertas de veículos", body = Vec<VehicleAlert>)),
    security(("api_jwt" = []))
)]
pub async fn list_vehicle_alerts(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
) -> Result<impl IntoResponse, ApiError> {
    let alerts = app_state
        .vehicle_service
        .list_alerts(&session)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(alerts))
}

#[utoipa::path(
    delete,
    path = "/api/movimentacao-estoque-loja/{id}",
    tag = "Veículos",
    responses(
        (status = 204, description = "Movimentação de estoque estornada"),
        (status = 403, description = "Apenas administradores")
    ),
    params(("id" = i64, Path, description = "ID da movimentação de estoque da loja")),
    security(("api_jwt" = []))
)]
pub async fn delete_store_stock_movement(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<RoleAdmin>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .vehicle_service
        .delete_store_stock_movement(&session, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
