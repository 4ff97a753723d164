//! Postgres-backed lead store adapter.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::PgPool;

use crate::domains::companies::{Company, NewCompany};
use crate::domains::contacts::{Contact, NewContact};

use super::BaseLeadStore;

/// Persists leads through the sqlx models.
pub struct PgLeadStore {
    pool: PgPool,
}

impl PgLeadStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseLeadStore for PgLeadStore {
    async fn insert_companies(&self, rows: Vec<NewCompany>) -> Result<Vec<Company>> {
        Company::insert_batch(&rows, &self.pool).await
    }

    async fn insert_contacts(&self, rows: Vec<NewContact>) -> Result<Vec<Contact>> {
        Contact::insert_batch(&rows, &self.pool).await
    }
}
