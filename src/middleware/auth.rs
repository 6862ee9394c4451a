// src/middleware/auth.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::session::Session,
};

// Extrator da sessão: valida o Bearer e guarda o resultado nas extensions,
// assim o guardião de papel não decodifica o token de novo.
impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<Session>() {
            return Ok(session.clone());
        }

        let locale = Locale::from_headers(&parts.headers);

        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| AppError::InvalidToken.to_api_error(&locale))?;

        let app_state = AppState::from_ref(state);
        let session = app_state
            .session_service
            .open_session(bearer.token())
            .map_err(|e| e.to_api_error(&locale))?;

        parts.extensions.insert(session.clone());
        Ok(session)
    }
}
