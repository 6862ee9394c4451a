// src/handlers/session.rs

use axum::{response::IntoResponse, Json};

use crate::models::session::{Claims, Session};

// Quem está logado (útil para o front decidir o que mostrar)
#[utoipa::path(
    get,
    path = "/api/me",
    tag = "Sessão",
    responses(
        (status = 200, description = "Dados do token atual", body = Claims),
        (status = 401, description = "Token ausente ou inválido")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(session: Session) -> impl IntoResponse {
    Json(session.claims)
}
