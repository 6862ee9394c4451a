// src/handlers/reports.rs

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    middleware::i18n::Locale,
    models::{
        reports::{ReportQuery, ReportView},
        session::Session,
    },
};

#[utoipa::path(
    get,
    path = "/api/relatorios/impressao",
    tag = "Relatórios",
    responses(
        (status = 200, description = "Relatório pronto para exibição", body = ReportView),
        (status = 400, description = "Parâmetros inválidos para gerar o relatório"),
        (status = 404, description = "Nenhum dado no período"),
        (status = 502, description = "Erro interno ao gerar o relatório")
    ),
    params(ReportQuery),
    security(("api_jwt" = []))
)]
pub async fn get_print_report(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let view = app_state
        .report_service
        .get_report(&session, &query)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    Ok(Json(view))
}

#[utoipa::path(
    get,
    path = "/api/relatorios/impressao.pdf",
    tag = "Relatórios",
    responses(
        (status = 200, description = "PDF do relatório", content_type = "application/pdf"),
        (status = 404, description = "Nenhum dado no período")
    ),
    params(ReportQuery),
    security(("api_jwt" = []))
)]
pub async fn get_print_report_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    session: Session,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let pdf_bytes = app_state
        .report_service
        .get_report_pdf(&session, &query)
        .await
        .map_err(|e| e.to_api_error(&locale))?;

    let filename = format!(
        "attachment; filename=\"relatorio_{}_{}.pdf\"",
        query.data_inicio.format("%Y%m%d"),
        query.data_fim.format("%Y%m%d")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, filename),
        ],
        pdf_bytes,
    ))
}
