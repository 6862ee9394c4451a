// src/handlers/catalog.rs

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
    models::{
        catalog::{Product, Store},
        session::Session,
    },
};

#[utoipa::path(
    get,
    path = "/api/lojas",
    tag = "Cadastros",
    responses((status = 200, description = "Lojas cadastradas", body = Vec<Store>)),
    security(("api_jwt" = []))
)]
pub async fn list_stores(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
) -> Result<impl IntoResponse, ApiError> {
    let stores = app_state
        .catalog_service
        .list_stores(&session)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(stores))
}

#[utoipa::path(
    delete,
    path = "/api/lojas/{id}",
    tag = "Cadastros",
    responses(
        (status = 204, description = "Loja removida"),
        (status = 403, description = "Apenas administradores")
    ),
    params(("id" = i64, Path, description = "ID da loja")),
    security(("api_jwt" = []))
)]
pub async fn delete_store(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<RoleAdmin>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .catalog_service
        .delete_store(&session, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/produtos",
    tag = "Cadastros",
    responses((status = 200, description = "Produtos (pelúcias) cadastrados", body = Vec<Product>)),
    security(("api_jwt" = []))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
) -> Result<impl IntoResponse, ApiError> {
    let products = app_state
        .catalog_service
        .list_products(&session)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(products))
}

#[utoipa::path(
    delete,
    path = "/api/produtos/{id}",
    tag = "Cadastros",
    responses(
        (status = 204, description = "Produto removido"),
        (status = 403, description = "Apenas administradores")
    ),
    params(("id" = i64, Path, description = "ID do produto")),
    security(("api_jwt" = []))
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    locale: Locale,
    _guard: RequireRole<RoleAdmin>,
    session: Session,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ApiError> {
    app_state
        .catalog_service
        .delete_product(&session, id)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(StatusCode::NO_CONTENT)
}
