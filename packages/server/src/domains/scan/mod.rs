pub mod location;
pub mod models;
pub mod optimizer;
pub mod qualify;
pub mod service;

pub use models::*;
pub use service::ScanService;
