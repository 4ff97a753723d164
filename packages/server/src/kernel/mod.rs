//! Infrastructure layer: dependency traits, provider adapters, retry policy.

pub mod ai;
pub mod deps;
pub mod retry;
pub mod search;
pub mod signals;
pub mod store;
pub mod test_dependencies;
pub mod traits;

pub use ai::GeminiTextGenerator;
pub use deps::ServerDeps;
pub use retry::{retry_with_backoff, RATE_LIMIT_BASE_DELAY, RATE_LIMIT_RETRIES};
pub use search::ApifySearchProvider;
pub use signals::ProbeSignalCollector;
pub use store::PgLeadStore;
pub use traits::{BaseLeadStore, BaseSearchProvider, BaseSignalCollector, BaseTextGenerator};
