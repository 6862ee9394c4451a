// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Sessão ---
        handlers::session::get_me,

        // --- Alertas ---
        handlers::alerts::list_alerts,
        handlers::alerts::correct_alert,

        // --- Máquinas ---
        handlers::machines::get_reconciliation,
        handlers::machines::mark_corrected,

        // --- Relatórios ---
        handlers::reports::get_print_report,
        handlers::reports::get_print_report_pdf,

        // --- Caixa ---
        handlers::cash::list_eligible_machines,
        handlers::cash::create_cash_registration,

        // --- Cadastros ---
        handlers::catalog::list_stores,
        handlers::catalog::delete_store,
        handlers::catalog::list_products,
        handlers::catalog::delete_product,

        // --- Veículos ---
        handlers::vehicles::list_vehicle_movements,
        handlers::vehicles::list_vehicle_alerts,
        handlers::vehicles::delete_store_stock_movement,
    ),
    components(
        schemas(
            // --- Sessão ---
            models::session::Role,
            models::session::Claims,

            // --- Alertas ---
            models::alerts::MovementAlert,
            models::alerts::RestockAlert,
            models::alerts::DisplayField,
            models::alerts::FeedAlertView,
            models::alerts::FeedAlert,
            models::alerts::AlertFeed,

            // --- Máquinas ---
            models::machines::Machine,
            models::machines::Movement,
            models::machines::MovementRow,
            models::machines::MachineReconciliation,

            // --- Relatórios ---
            models::reports::ValueFormat,
            models::reports::PeriodView,
            models::reports::MoneyView,
            models::reports::TotalsView,
            models::reports::StoreTotalsView,
            models::reports::HighlightView,
            models::reports::BarRow,
            models::reports::ChartView,
            models::reports::ReportView,

            // --- Caixa ---
            models::cash::VariableExpenseInput,
            models::cash::CashRegistrationForm,
            models::cash::EligibilityRule,
            models::cash::EligibleMachines,

            // --- Cadastros ---
            models::catalog::Store,
            models::catalog::Product,

            // --- Veículos ---
            models::vehicles::VehicleMovement,
            models::vehicles::VehicleAlert,
        )
    ),
    tags(
        (name = "Sessão", description = "Dados do usuário logado"),
        (name = "Alertas", description = "Feed unificado de alertas das máquinas"),
        (name = "Máquinas", description = "Reconciliação de estoque por máquina"),
        (name = "Relatórios", description = "Relatório de impressão por período"),
        (name = "Caixa", description = "Registro de dinheiro e cartão/pix"),
        (name = "Cadastros", description = "Lojas e produtos"),
        (name = "Veículos", description = "Diário de bordo e estoque das lojas")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
