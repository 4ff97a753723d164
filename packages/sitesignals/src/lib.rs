//! Website Technical-Signal Probes
//!
//! Three independent probes per candidate website — performance score,
//! technology-stack fingerprint, and a content scrape — plus a facade that
//! runs all three and assembles a [`SignalBundle`].
//!
//! # Design
//!
//! Every probe is total: a network error, non-200 status, timeout, or parse
//! error degrades to that probe's neutral default (unknown score, empty
//! stack, empty scrape) with a warning log. One unreachable website must
//! never abort the scan of the remaining candidates, so the failure policy
//! lives here rather than in callers.
//!
//! # Usage
//!
//! ```rust,ignore
//! use sitesignals::SignalProbe;
//!
//! let probe = SignalProbe::new(Some("pagespeed-api-key".into()));
//! let bundle = probe.collect("example.com").await;
//! println!("score: {:?}, wordpress: {}", bundle.pagespeed_score, bundle.tech.is_wordpress);
//! ```

pub mod error;
pub mod pagespeed;
pub mod scrape;
pub mod techstack;
pub mod types;

pub use error::SignalError;
pub use pagespeed::PagespeedClient;
pub use scrape::ContentScraper;
pub use techstack::TechDetector;
pub use types::{ScrapedContent, SignalBundle, TechStack};

/// Prefix bare domains with `https://` so probes always get a full URL.
pub fn ensure_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Facade over the three signal probes.
pub struct SignalProbe {
    pagespeed: PagespeedClient,
    tech: TechDetector,
    scraper: ContentScraper,
}

impl SignalProbe {
    pub fn new(pagespeed_api_key: Option<String>) -> Self {
        Self {
            pagespeed: PagespeedClient::new(pagespeed_api_key),
            tech: TechDetector::new(),
            scraper: ContentScraper::new(),
        }
    }

    /// Collect all signals for one candidate website.
    ///
    /// `website` is the raw value from the search listing; SSL is judged on
    /// that raw value, while probes run against the scheme-normalized URL.
    /// The three probes are independent and run concurrently.
    pub async fn collect(&self, website: &str) -> SignalBundle {
        let has_ssl = website.starts_with("https");
        let url = ensure_scheme(website);

        let (pagespeed_score, tech, scraped) = tokio::join!(
            self.pagespeed.fetch_score(&url),
            self.tech.detect(&url),
            self.scraper.scrape(&url),
        );

        SignalBundle {
            has_ssl,
            pagespeed_score,
            tech,
            scraped,
        }
    }
}
