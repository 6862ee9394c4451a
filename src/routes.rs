// src/routes.rs

use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers, middleware::request_id::request_id};

pub fn router(app_state: AppState) -> Router {
    let alert_routes = Router::new()
        .route("/", get(handlers::alerts::list_alerts))
        .route("/{id}", delete(handlers::alerts::correct_alert));

    let machine_routes = Router::new()
        .route("/{id}/reconciliacao", get(handlers::machines::get_reconciliation))
        .route("/{id}/corrigido", post(handlers::machines::mark_corrected));

    let report_routes = Router::new()
        .route("/impressao", get(handlers::reports::get_print_report))
        .route("/impressao.pdf", get(handlers::reports::get_print_report_pdf));

    let cash_routes = Router::new()
        .route("/", post(handlers::cash::create_cash_registration))
        .route("/maquinas-elegiveis", get(handlers::cash::list_eligible_machines));

    let catalog_routes = Router::new()
        .route("/lojas", get(handlers::catalog::list_stores))
        .route("/lojas/{id}", delete(handlers::catalog::delete_store))
        .route("/produtos", get(handlers::catalog::list_products))
        .route("/produtos/{id}", delete(handlers::catalog::delete_product));

    let vehicle_routes = Router::new()
        .route("/veiculos/{id}/movimentacoes", get(handlers::vehicles::list_vehicle_movements))
        .route("/alertas-veiculos", get(handlers::vehicles::list_vehicle_alerts))
        .route(
            "/movimentacao-estoque-loja/{id}",
            delete(handlers::vehicles::delete_store_stock_movement),
        );

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/me", get(handlers::session::get_me))
        .nest("/api/alertas", alert_routes)
        .nest("/api/maquinas", machine_routes)
        .nest("/api/relatorios", report_routes)
        .nest("/api/caixa", cash_routes)
        .nest("/api", catalog_routes.merge(vehicle_routes))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(axum_middleware::from_fn(request_id))
        .with_state(app_state)
}
