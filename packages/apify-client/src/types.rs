use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Input for the compass/crawler-google-places actor.
#[derive(Debug, Clone, Serialize)]
pub struct GooglePlacesInput {
    #[serde(rename = "searchStringsArray")]
    pub search_strings_array: Vec<String>,
    #[serde(rename = "maxCrawledPlacesPerSearch")]
    pub max_crawled_places_per_search: u32,
    pub language: String,
    #[serde(rename = "maxImages")]
    pub max_images: u32,
}

/// A single business listing from the Google Places dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceListing {
    pub title: Option<String>,
    pub website: Option<String>,
    /// Google Maps URL of the place.
    pub url: Option<String>,
    #[serde(rename = "categoryName")]
    pub category_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

/// Wrapper for Apify API responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

/// Apify actor run metadata.
#[derive(Debug, Clone, Deserialize)]
pub struct RunData {
    pub id: String,
    pub status: String,
    #[serde(rename = "defaultDatasetId")]
    pub default_dataset_id: String,
    #[serde(rename = "startedAt")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "finishedAt")]
    pub finished_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn places_input_serializes_with_actor_field_names() {
        let input = GooglePlacesInput {
            search_strings_array: vec!["coffee in Hanoi".to_string()],
            max_crawled_places_per_search: 5,
            language: "en".to_string(),
            max_images: 0,
        };

        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["searchStringsArray"][0], "coffee in Hanoi");
        assert_eq!(json["maxCrawledPlacesPerSearch"], 5);
        assert_eq!(json["maxImages"], 0);
    }

    #[test]
    fn listing_deserializes_with_missing_website() {
        let json = r#"{
            "title": "Pho 24",
            "url": "https://maps.google.com/?cid=1",
            "categoryName": "Restaurant",
            "address": "123 Le Loi, Ho Chi Minh City",
            "phone": "+84 28 1234 5678"
        }"#;

        let listing: PlaceListing = serde_json::from_str(json).unwrap();
        assert_eq!(listing.title.as_deref(), Some("Pho 24"));
        assert!(listing.website.is_none());
        assert_eq!(listing.category_name.as_deref(), Some("Restaurant"));
    }
}
