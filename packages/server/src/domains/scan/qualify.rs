//! Lead qualification rule.
//!
//! A site is a lead if any weakness shows: slow measured performance, no
//! HTTPS, WordPress, or no chat/support agent installed. Only sites with
//! none of these are turned away.

use sitesignals::TechStack;

use super::models::LeadStatus;

pub const DISQUALIFY_HIGH_PERFORMANCE: &str = "High Performance Site";

const SLOW_SCORE_THRESHOLD: u8 = 50;

/// Apply the disjunctive qualification rule. An unmeasured pagespeed score
/// never counts as slow.
pub fn qualify(
    has_ssl: bool,
    pagespeed: Option<u8>,
    tech: &TechStack,
) -> (LeadStatus, Option<String>) {
    let slow = matches!(pagespeed, Some(score) if score < SLOW_SCORE_THRESHOLD);

    if slow || !has_ssl || tech.is_wordpress || !tech.has_agent() {
        (LeadStatus::Qualified, None)
    } else {
        (
            LeadStatus::Disqualified,
            Some(DISQUALIFY_HIGH_PERFORMANCE.to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strong_site_tech() -> TechStack {
        TechStack {
            agents: vec!["Intercom".to_string()],
            is_wordpress: false,
            ..Default::default()
        }
    }

    #[test]
    fn slow_site_qualifies() {
        let (status, reason) = qualify(true, Some(40), &strong_site_tech());
        assert_eq!(status, LeadStatus::Qualified);
        assert!(reason.is_none());
    }

    #[test]
    fn missing_ssl_qualifies() {
        let (status, _) = qualify(false, Some(95), &strong_site_tech());
        assert_eq!(status, LeadStatus::Qualified);
    }

    #[test]
    fn wordpress_qualifies() {
        let tech = TechStack {
            is_wordpress: true,
            ..strong_site_tech()
        };
        let (status, _) = qualify(true, Some(95), &tech);
        assert_eq!(status, LeadStatus::Qualified);
    }

    #[test]
    fn no_agent_qualifies() {
        let tech = TechStack {
            agents: vec![],
            ..strong_site_tech()
        };
        let (status, _) = qualify(true, Some(95), &tech);
        assert_eq!(status, LeadStatus::Qualified);
    }

    #[test]
    fn strong_site_is_disqualified() {
        let (status, reason) = qualify(true, Some(95), &strong_site_tech());
        assert_eq!(status, LeadStatus::Disqualified);
        assert_eq!(reason.as_deref(), Some(DISQUALIFY_HIGH_PERFORMANCE));
    }

    #[test]
    fn unmeasured_score_is_not_slow() {
        // None means "not measured"; the site can still be disqualified if
        // every other signal is strong.
        let (status, _) = qualify(true, None, &strong_site_tech());
        assert_eq!(status, LeadStatus::Disqualified);
    }

    #[test]
    fn threshold_boundary() {
        let (at_threshold, _) = qualify(true, Some(50), &strong_site_tech());
        assert_eq!(at_threshold, LeadStatus::Disqualified);

        let (below, _) = qualify(true, Some(49), &strong_site_tech());
        assert_eq!(below, LeadStatus::Qualified);
    }
}
