// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use thiserror::Error;

use crate::middleware::i18n::Locale;

// Erros internos da aplicação. Os handlers nunca devolvem isso direto:
// convertem para `ApiError` com `to_api_error`, que escolhe a mensagem pelo idioma.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Token inválido")]
    InvalidToken,

    #[error("Acesso negado: requer o papel '{0}'")]
    Forbidden(&'static str),

    // O backend respondeu com status de erro.
    #[error("Backend respondeu {status}: {message}")]
    Upstream { status: u16, message: String },

    // Falha de rede / timeout ao falar com o backend.
    #[error("Falha de comunicação com o backend: {0}")]
    Transport(String),

    // O backend respondeu 2xx mas o corpo não tem o formato esperado.
    #[error("Resposta inesperada do backend: {0}")]
    Decode(String),

    // Erro do backend ao montar o relatório de impressão (mensagens próprias por status).
    #[error("Backend falhou ao gerar o relatório: status {0}")]
    ReportFailed(u16),

    #[error("Já existe uma operação em andamento para esta sessão")]
    OperationInFlight,

    #[error("Máquina {0} não possui alerta vinculado")]
    AlertIdMissing(i64),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Erro ao gerar PDF: {0}")]
    PdfError(String),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        if let Some(status) = e.status() {
            return AppError::Upstream {
                status: status.as_u16(),
                message: e.to_string(),
            };
        }
        if e.is_decode() {
            return AppError::Decode(e.to_string());
        }
        AppError::Transport(e.to_string())
    }
}

// O erro que efetivamente vai para o cliente.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self { status, error: error.into(), details: None }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

fn pick(locale: &Locale, pt: &str, en: &str) -> String {
    if locale.is_english() { en.to_string() } else { pt.to_string() }
}

impl AppError {
    /// Status HTTP que o nosso cliente recebe para este erro.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Upstream { status: 400, .. } => StatusCode::BAD_REQUEST,
            AppError::Upstream { status: 401, .. } => StatusCode::UNAUTHORIZED,
            AppError::Upstream { status: 403, .. } => StatusCode::FORBIDDEN,
            AppError::Upstream { status: 404, .. } => StatusCode::NOT_FOUND,
            AppError::Upstream { .. } | AppError::Transport(_) | AppError::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
            AppError::ReportFailed(400) => StatusCode::BAD_REQUEST,
            AppError::ReportFailed(404) => StatusCode::NOT_FOUND,
            AppError::ReportFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::OperationInFlight => StatusCode::CONFLICT,
            AppError::AlertIdMissing(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::FontNotFound(_)
            | AppError::PdfError(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte para a resposta pública, com mensagem no idioma do cliente.
    pub fn to_api_error(self, locale: &Locale) -> ApiError {
        let status = self.status();

        let error = match &self {
            AppError::ValidationError(errors) => {
                let mut details: HashMap<String, Vec<String>> = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                return ApiError {
                    status,
                    error: pick(locale, "Um ou mais campos são inválidos.", "One or more fields are invalid."),
                    details: Some(json!(details)),
                };
            }
            AppError::InvalidToken => pick(
                locale,
                "Token de autenticação inválido ou ausente.",
                "Missing or invalid authentication token.",
            ),
            AppError::Forbidden(role) => {
                if locale.is_english() {
                    format!("This action requires the '{}' role.", role)
                } else {
                    format!("Você precisa do papel '{}' para realizar esta ação.", role)
                }
            }
            AppError::Upstream { status: 400, .. } => pick(
                locale,
                "Requisição rejeitada pelo servidor.",
                "Request rejected by the server.",
            ),
            AppError::Upstream { status: 404, .. } => pick(
                locale,
                "Registro não encontrado.",
                "Record not found.",
            ),
            AppError::Upstream { status: 401 | 403, .. } => pick(
                locale,
                "Sem permissão no servidor de dados.",
                "Not allowed by the data server.",
            ),
            AppError::ReportFailed(400) => pick(
                locale,
                "Parâmetros inválidos para gerar o relatório.",
                "Invalid parameters for this report.",
            ),
            AppError::ReportFailed(404) => pick(
                locale,
                "Nenhum dado encontrado para o período selecionado.",
                "No data found for the selected period.",
            ),
            AppError::ReportFailed(_) => pick(
                locale,
                "Erro interno ao gerar o relatório.",
                "Internal error while generating the report.",
            ),
            AppError::OperationInFlight => pick(
                locale,
                "Aguarde: já existe uma operação em andamento.",
                "Please wait: an operation is already in progress.",
            ),
            AppError::AlertIdMissing(_) => pick(
                locale,
                "Esta máquina não possui alerta para corrigir.",
                "This machine has no alert to correct.",
            ),
            e @ (AppError::Upstream { .. } | AppError::Transport(_) | AppError::Decode(_)) => {
                tracing::error!("Falha no backend: {}", e);
                pick(
                    locale,
                    "Não foi possível carregar os dados. Tente novamente.",
                    "Could not load data. Please try again.",
                )
            }
            e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                pick(locale, "Ocorreu um erro inesperado.", "An unexpected error occurred.")
            }
        };

        ApiError { status, error, details: None }
    }
}

// Permite usar `?` com AppError em extratores/handlers que não têm o Locale à mão.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default()).into_response()
    }
}
