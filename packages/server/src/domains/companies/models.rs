//! Company lead records.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use apify_client::PlaceListing;
use sitesignals::SignalBundle;

/// A scanned business, persisted with every signal we collected about it.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Company {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub name: String,
    pub website_url: String,
    pub google_maps_url: Option<String>,
    pub industry: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub has_ssl: bool,
    /// `None` when the performance probe could not produce a score.
    pub pagespeed_score: Option<i32>,
    pub is_wordpress: bool,
    pub crm_system: Option<String>,
    pub agents: Vec<String>,
    pub emails: Vec<String>,
    /// Platform name -> profile URL, stored as JSONB.
    pub socials: serde_json::Value,
    pub description: Option<String>,
    pub status: String,
    pub disqualify_reason: Option<String>,
    /// The original "keyword - location" pair that surfaced this lead.
    pub search_keyword: String,
}

/// Insertable company row, assembled from a listing and its probe results.
#[derive(Debug, Clone)]
pub struct NewCompany {
    pub name: String,
    pub website_url: String,
    pub google_maps_url: Option<String>,
    pub industry: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub has_ssl: bool,
    pub pagespeed_score: Option<i32>,
    pub is_wordpress: bool,
    pub crm_system: Option<String>,
    pub agents: Vec<String>,
    pub emails: Vec<String>,
    pub socials: serde_json::Value,
    pub description: Option<String>,
    pub status: String,
    pub disqualify_reason: Option<String>,
    pub search_keyword: String,
}

impl NewCompany {
    /// Build a row from a place listing and the signals probed off its
    /// website. The caller guarantees the listing has a website.
    pub fn from_assessment(
        listing: &PlaceListing,
        website_url: String,
        bundle: &SignalBundle,
        status: String,
        disqualify_reason: Option<String>,
        search_keyword: String,
    ) -> Self {
        let description = if bundle.scraped.description.is_empty() {
            None
        } else {
            Some(bundle.scraped.description.clone())
        };

        Self {
            name: listing
                .title
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            website_url,
            google_maps_url: listing.url.clone(),
            industry: listing
                .category_name
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            address: listing.address.clone(),
            phone: listing.phone.clone(),
            has_ssl: bundle.has_ssl,
            pagespeed_score: bundle.pagespeed_score.map(i32::from),
            is_wordpress: bundle.tech.is_wordpress,
            crm_system: bundle.tech.crm.first().cloned(),
            agents: bundle.tech.agents.clone(),
            emails: bundle.scraped.emails.clone(),
            socials: serde_json::to_value(&bundle.scraped.socials)
                .unwrap_or(serde_json::Value::Null),
            description,
            status,
            disqualify_reason,
            search_keyword,
        }
    }
}

impl Company {
    /// Insert a batch of companies in one transaction and return the stored
    /// rows in insertion order.
    pub async fn insert_batch(rows: &[NewCompany], pool: &PgPool) -> Result<Vec<Company>> {
        let mut tx = pool.begin().await.context("Failed to begin transaction")?;
        let mut inserted = Vec::with_capacity(rows.len());

        for row in rows {
            let company = sqlx::query_as::<_, Company>(
                r#"
                INSERT INTO companies (
                    name, website_url, google_maps_url, industry, address, phone,
                    has_ssl, pagespeed_score, is_wordpress, crm_system, agents,
                    emails, socials, description, status, disqualify_reason,
                    search_keyword
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
                RETURNING *
                "#,
            )
            .bind(&row.name)
            .bind(&row.website_url)
            .bind(&row.google_maps_url)
            .bind(&row.industry)
            .bind(&row.address)
            .bind(&row.phone)
            .bind(row.has_ssl)
            .bind(row.pagespeed_score)
            .bind(row.is_wordpress)
            .bind(&row.crm_system)
            .bind(&row.agents)
            .bind(&row.emails)
            .bind(&row.socials)
            .bind(&row.description)
            .bind(&row.status)
            .bind(&row.disqualify_reason)
            .bind(&row.search_keyword)
            .fetch_one(&mut *tx)
            .await
            .context("Failed to insert company")?;

            inserted.push(company);
        }

        tx.commit().await.context("Failed to commit transaction")?;
        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitesignals::TechStack;

    fn listing() -> PlaceListing {
        PlaceListing {
            title: Some("Saigon Dental".to_string()),
            website: Some("https://saigondental.vn".to_string()),
            url: Some("https://maps.google.com/?cid=42".to_string()),
            category_name: Some("Dentist".to_string()),
            address: Some("12 Nguyen Hue, Ho Chi Minh City".to_string()),
            phone: Some("+84 28 9999 0000".to_string()),
        }
    }

    #[test]
    fn from_assessment_maps_listing_and_signals() {
        let bundle = SignalBundle {
            has_ssl: true,
            pagespeed_score: Some(40),
            tech: TechStack {
                crm: vec!["HubSpot".to_string()],
                agents: vec!["Intercom".to_string()],
                is_wordpress: true,
                ..Default::default()
            },
            scraped: Default::default(),
        };

        let row = NewCompany::from_assessment(
            &listing(),
            "https://saigondental.vn".to_string(),
            &bundle,
            "QUALIFIED".to_string(),
            None,
            "dentist - Ho Chi Minh City".to_string(),
        );

        assert_eq!(row.name, "Saigon Dental");
        assert_eq!(row.industry, "Dentist");
        assert_eq!(row.pagespeed_score, Some(40));
        assert_eq!(row.crm_system.as_deref(), Some("HubSpot"));
        assert!(row.is_wordpress);
        assert_eq!(row.description, None);
        assert_eq!(row.search_keyword, "dentist - Ho Chi Minh City");
    }

    #[test]
    fn from_assessment_defaults_missing_listing_fields() {
        let bare = PlaceListing {
            title: None,
            website: Some("http://example.com".to_string()),
            url: None,
            category_name: None,
            address: None,
            phone: None,
        };

        let row = NewCompany::from_assessment(
            &bare,
            "http://example.com".to_string(),
            &SignalBundle::default(),
            "QUALIFIED".to_string(),
            None,
            "x - y".to_string(),
        );

        assert_eq!(row.name, "Unknown");
        assert_eq!(row.industry, "Unknown");
        assert_eq!(row.pagespeed_score, None);
        assert!(row.crm_system.is_none());
    }
}
