//! Location alias matching for strict-pass filtering.
//!
//! Google Places addresses spell Vietnamese cities many ways ("TP. Hồ Chí
//! Minh", "Saigon", "HCMC"). A matcher expands the requested location into a
//! set of diacritic-free aliases and accepts any address containing one.

use std::collections::BTreeSet;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Known metro-area nicknames, keyed by the normalized city name.
static METRO_VARIANTS: &[(&str, &[&str])] = &[
    (
        "ho chi minh",
        &[
            "hcmc",
            "tp hcm",
            "tphcm",
            "saigon",
            "sai gon",
            "thanh pho ho chi minh",
        ],
    ),
    ("hanoi", &["ha noi"]),
    ("ha noi", &["hanoi"]),
    ("da nang", &["danang"]),
    // U+0111 does not decompose under NFD, so match it explicitly.
    ("đa nang", &["da nang", "danang"]),
];

/// Lowercase and strip combining marks, turning "Hồ Chí Minh" into
/// "ho chi minh".
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Substring matcher over the normalized aliases of one location.
#[derive(Debug, Clone)]
pub struct LocationMatcher {
    aliases: BTreeSet<String>,
}

impl LocationMatcher {
    pub fn new(location: &str) -> Self {
        let mut aliases = BTreeSet::new();

        let raw = location.trim().to_lowercase();
        if !raw.is_empty() {
            aliases.insert(raw.clone());
        }

        let normalized = normalize(location.trim());
        if !normalized.is_empty() {
            aliases.insert(normalized.clone());
        }

        // "Ho Chi Minh City" should also match addresses that drop "City".
        let without_city: String = normalized
            .split_whitespace()
            .filter(|word| *word != "city")
            .collect::<Vec<_>>()
            .join(" ");
        if !without_city.is_empty() {
            aliases.insert(without_city.clone());
        }

        for (key, variants) in METRO_VARIANTS {
            if normalized.contains(key) || without_city.contains(key) {
                for variant in *variants {
                    aliases.insert((*variant).to_string());
                }
            }
        }

        Self { aliases }
    }

    /// Whether the listing address names this location. Addresses without a
    /// value never match.
    pub fn matches(&self, address: Option<&str>) -> bool {
        let Some(address) = address else {
            return false;
        };
        let haystack = normalize(address);
        self.aliases.iter().any(|alias| haystack.contains(alias))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_diacritics() {
        assert_eq!(normalize("Hồ Chí Minh"), "ho chi minh");
        assert_eq!(normalize("Hà Nội"), "ha noi");
    }

    #[test]
    fn matches_diacritic_spelling() {
        let matcher = LocationMatcher::new("Ho Chi Minh City");
        assert!(matcher.matches(Some("123 Lê Lợi, Quận 1, Thành phố Hồ Chí Minh")));
    }

    #[test]
    fn matches_metro_nicknames() {
        let matcher = LocationMatcher::new("Ho Chi Minh City");
        assert!(matcher.matches(Some("Level 4, Saigon Centre, District 1")));
        assert!(matcher.matches(Some("12 Vo Van Tan, HCMC")));
    }

    #[test]
    fn matches_without_city_suffix() {
        let matcher = LocationMatcher::new("Ho Chi Minh City");
        assert!(matcher.matches(Some("45 Nguyen Trai, Ho Chi Minh, Vietnam")));
    }

    #[test]
    fn rejects_other_cities_and_missing_addresses() {
        let matcher = LocationMatcher::new("Ho Chi Minh City");
        assert!(!matcher.matches(Some("22 Trang Tien, Hoan Kiem, Ha Noi")));
        assert!(!matcher.matches(None));
    }

    #[test]
    fn hanoi_spellings_cross_match() {
        let matcher = LocationMatcher::new("Hanoi");
        assert!(matcher.matches(Some("Phố Huế, Hà Nội")));

        let spaced = LocationMatcher::new("Ha Noi");
        assert!(spaced.matches(Some("36 Hang Bac, Hanoi")));
    }
}
