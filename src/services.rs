pub mod alert_feed_service;
pub mod cash_service;
pub mod catalog_service;
pub mod machine_policy;
pub mod machine_service;
pub mod report_service;
pub mod session_service;
pub mod vehicle_service;
