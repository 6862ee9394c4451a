pub mod alerts;
pub mod cash;
pub mod catalog;
pub mod machines;
pub mod reports;
pub mod session;
pub mod vehicles;
