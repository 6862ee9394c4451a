// src/middleware/rbac.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use std::marker::PhantomData;

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    middleware::i18n::Locale,
    models::session::{Role, Session},
};

/// 1. O Trait que define um papel exigido
pub trait RoleDef: Send + Sync + 'static {
    fn role() -> Role;
    fn slug() -> &'static str;
}

/// 2. O Extractor (Guardião)
pub struct RequireRole<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state).await?;

        if session.role() != T::role() {
            tracing::warn!(
                "Usuário {} tentou ação que exige '{}'",
                session.subject(),
                T::slug()
            );
            let locale = Locale::from_headers(&parts.headers);
            return Err(AppError::Forbidden(T::slug()).to_api_error(&locale));
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS PAPÉIS (TIPOS)
// ---

pub struct RoleAdmin;
impl RoleDef for RoleAdmin {
    fn role() -> Role { Role::Admin }
    fn slug() -> &'static str { "admin" }
}
