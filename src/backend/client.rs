// src/backend/client.rs

use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{common::error::AppError, models::session::Session};

// Cliente HTTP compartilhado por todos os repositórios.
// O reqwest::Client já é um Arc por dentro, então clonar é barato.
#[derive(Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    // Monta a requisição já com o token da sessão
    fn authed(&self, session: &Session, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&session.token)
    }

    // O backend devolve `{ error }` ou `{ message }` nos erros; usamos o que vier.
    async fn check(path: &str, response: Response) -> Result<Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| {
                v.get("error")
                    .or_else(|| v.get("message"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or(body);

        tracing::warn!("Backend respondeu {} em {}: {}", status.as_u16(), path, message);
        Err(AppError::Upstream { status: status.as_u16(), message })
    }

    pub async fn get_json<T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, AppError> {
        tracing::debug!("GET {} {:?}", path, query);
        let response = self
            .authed(session, Method::GET, path)
            .query(query)
            .send()
            .await?;
        let response = Self::check(path, response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Decode(format!("{}: {}", path, e)))
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        tracing::debug!("POST {}", path);
        let response = self
            .authed(session, Method::POST, path)
            .json(body)
            .send()
            .await?;
        let response = Self::check(path, response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| AppError::Decode(format!("{}: {}", path, e)))
    }

    /// DELETE, opcionalmente com corpo JSON. O corpo da resposta é descartado.
    pub async fn delete<B: Serialize>(
        &self,
        session: &Session,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), AppError> {
        tracing::debug!("DELETE {}", path);
        let mut request = self.authed(session, Method::DELETE, path);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        Self::check(path, response).await?;
        Ok(())
    }
}
