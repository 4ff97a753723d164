pub mod contacts;
pub mod draft;
pub mod enrich;
pub mod health;
pub mod scan;

pub use contacts::update_contact_status_handler;
pub use draft::draft_handler;
pub use enrich::enrich_handler;
pub use health::health_handler;
pub use scan::scan_handler;
