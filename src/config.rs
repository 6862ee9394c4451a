// src/config.rs

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;

use crate::{
    backend::{
        AlertRepository, BackendClient, CashRepository, CatalogRepository, MachineRepository,
        ReportRepository, VehicleRepository,
    },
    services::{
        alert_feed_service::{AlertFeedService, InFlightGate},
        cash_service::CashService,
        catalog_service::CatalogService,
        machine_service::MachineService,
        report_service::ReportService,
        session_service::SessionService,
        vehicle_service::VehicleService,
    },
};

// Configurações lidas do ambiente (.env)
#[derive(Debug, Clone)]
pub struct Config {
    pub backend_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub backend_timeout: Duration,
    pub fonts_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let backend_url = env::var("BACKEND_URL").context("BACKEND_URL deve ser definida")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let timeout_secs = match env::var("BACKEND_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse::<u64>()
                .with_context(|| format!("BACKEND_TIMEOUT_SECS inválido: '{}'", raw))?,
            Err(_) => 30,
        };

        let fonts_dir = env::var("FONTS_DIR").unwrap_or_else(|_| "./fonts".to_string());

        Ok(Self {
            backend_url,
            jwt_secret,
            bind_addr,
            backend_timeout: Duration::from_secs(timeout_secs),
            fonts_dir: PathBuf::from(fonts_dir),
        })
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub session_service: SessionService,
    pub alert_feed_service: AlertFeedService,
    pub machine_service: MachineService,
    pub report_service: ReportService,
    pub cash_service: CashService,
    pub catalog_service: CatalogService,
    pub vehicle_service: VehicleService,
}

impl AppState {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = BackendClient::new(&config.backend_url, config.backend_timeout)?;
        tracing::info!("✅ Cliente do backend configurado para {}", config.backend_url);

        // --- Monta o gráfico de dependências ---
        let alert_repo = AlertRepository::new(client.clone());
        let machine_repo = MachineRepository::new(client.clone());
        let report_repo = ReportRepository::new(client.clone());
        let cash_repo = CashRepository::new(client.clone());
        let catalog_repo = CatalogRepository::new(client.clone());
        let vehicle_repo = VehicleRepository::new(client);

        let gate = Arc::new(InFlightGate::default());

        Ok(Self {
            session_service: SessionService::new(config.jwt_secret.clone()),
            alert_feed_service: AlertFeedService::new(alert_repo.clone(), gate.clone()),
            machine_service: MachineService::new(machine_repo.clone(), alert_repo, gate),
            report_service: ReportService::new(report_repo, config.fonts_dir.clone()),
            cash_service: CashService::new(cash_repo, catalog_repo.clone(), machine_repo),
            catalog_service: CatalogService::new(catalog_repo),
            vehicle_service: VehicleService::new(vehicle_repo),
        })
    }
}
