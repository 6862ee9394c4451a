pub mod client;
pub use client::BackendClient;
pub mod alert_repo;
pub use alert_repo::AlertRepository;
pub mod machine_repo;
pub use machine_repo::MachineRepository;
pub mod report_repo;
pub use report_repo::ReportRepository;
pub mod cash_repo;
pub use cash_repo::CashRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod vehicle_repo;
pub use vehicle_repo::VehicleRepository;
