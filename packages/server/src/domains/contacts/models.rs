//! Contact records attached to company leads.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A decision-maker found for a company.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contact {
    pub id: Uuid,
    pub company_id: Uuid,
    pub full_name: String,
    pub position: Option<String>,
    pub linkedin_url: Option<String>,
    pub email: Option<String>,
    pub is_primary_decision_maker: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable contact row.
#[derive(Debug, Clone)]
pub struct NewContact {
    pub company_id: Uuid,
    pub full_name: String,
    pub position: Option<String>,
    pub linkedin_url: Option<String>,
    pub email: Option<String>,
    pub is_primary_decision_maker: bool,
    pub status: String,
}

impl Contact {
    /// Insert a batch of contacts in one transaction.
    pub async fn insert_batch(rows: &[NewContact], pool: &PgPool) -> Result<Vec<Contact>> {
        let mut tx = pool.begin().await.context("Failed to begin transaction")?;
        let mut inserted = Vec::with_capacity(rows.len());

        for row in rows {
            let contact = sqlx::query_as::<_, Contact>(
                r#"
                INSERT INTO contacts (
                    company_id, full_name, "position", linkedin_url, email,
                    is_primary_decision_maker, status
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
                "#,
            )
            .bind(row.company_id)
            .bind(&row.full_name)
            .bind(&row.position)
            .bind(&row.linkedin_url)
            .bind(&row.email)
            .bind(row.is_primary_decision_maker)
            .bind(&row.status)
            .fetch_one(&mut *tx)
            .await
            .context("Failed to insert contact")?;

            inserted.push(contact);
        }

        tx.commit().await.context("Failed to commit transaction")?;
        Ok(inserted)
    }

    /// Update a contact's outreach status.
    pub async fn update_status(id: Uuid, status: &str, pool: &PgPool) -> Result<Option<Contact>> {
        let contact = sqlx::query_as::<_, Contact>(
            r#"
            UPDATE contacts SET status = $2 WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .fetch_optional(pool)
        .await
        .context("Failed to update contact status")?;

        Ok(contact)
    }
}
