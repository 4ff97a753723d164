// Lead-Qualification Pipeline - API Core
//
// This crate provides the backend API for scanning local businesses and
// qualifying them as sales leads based on technical-health signals.
// Architecture follows domain-driven design; external collaborators are
// injected through the Base* traits in kernel/.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
