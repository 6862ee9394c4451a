// src/services/catalog_service.rs

use crate::{
    backend::CatalogRepository,
    common::error::AppError,
    models::{
        catalog::{Product, Store},
        session::Session,
    },
};

#[derive(Clone)]
pub struct CatalogService {
    repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(repo: CatalogRepository) -> Self {
        Self { repo }
    }

    pub async fn list_stores(&self, session: &Session) -> Result<Vec<Store>, AppError> {
        self.repo.list_stores(session).await
    }

    pub async fn delete_store(&self, session: &Session, id: i64) -> Result<(), AppError> {
        self.repo.delete_store(session, id).await?;
        tracing::info!("🗑️ Loja {} removida por {}", id, session.subject());
        Ok(())
    }

    pub async fn list_products(&self, session: &Session) -> Result<Vec<Product>, AppError> {
        self.repo.list_products(session).await
    }

    pub async fn delete_product(&self, session: &Session, id: i64) -> Result<(), AppError> {
        self.repo.delete_product(session, id).await?;
        tracing::info!("🗑️ Produto {} removido por {}", id, session.subject());
        Ok(())
    }
}
