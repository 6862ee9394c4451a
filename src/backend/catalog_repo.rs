// src/backend/catalog_repo.rs

use crate::{
    backend::client::BackendClient,
    common::error::AppError,
    models::{
        catalog::{Product, Store},
        session::Session,
    },
};

// Lojas e produtos: CRUD simples do backend
#[derive(Clone)]
pub struct CatalogRepository {
    client: BackendClient,
}

impl CatalogRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }

    pub async fn list_stores(&self, session: &Session) -> Result<Vec<Store>, AppError> {
        self.client.get_json(session, "/lojas", &[]).await
    }

    pub async fn get_store(&self, session: &Session, id: i64) -> Result<Store, AppError> {
        self.client
            .get_json(session, &format!("/lojas/{}", id), &[])
            .await
    }

    pub async fn delete_store(&self, session: &Session, id: i64) -> Result<(), AppError> {
        self.client
            .delete(session, &format!("/lojas/{}", id), None::<&()>)
            .await
    }

    pub async fn list_products(&self, session: &Session) -> Result<Vec<Product>, AppError> {
        self.client.get_json(session, "/produtos", &[]).await
    }

    pub async fn delete_product(&self, session: &Session, id: i64) -> Result<(), AppError> {
        self.client
            .delete(session, &format!("/produtos/{}", id), None::<&()>)
            .await
    }
}
