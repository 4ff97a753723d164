pub mod enrich;
pub mod models;

pub use models::*;
