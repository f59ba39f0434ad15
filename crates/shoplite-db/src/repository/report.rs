//! # Shop-Report Repository
//!
//! Database operations for reports submitted by shop staff. Attachments
//! live in blob storage; this layer only carries the opaque URL.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use shoplite_core::ShopReport;

/// Repository for shop-report database operations.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Submits a report for a shop.
    pub async fn create(
        &self,
        shop_id: &str,
        title: &str,
        notes: &str,
        attachment_url: Option<&str>,
        submitted_by: &str,
    ) -> DbResult<ShopReport> {
        debug!(shop_id = %shop_id, title = %title, "Inserting report");

        let report = ShopReport {
            id: Uuid::new_v4().to_string(),
            shop_id: shop_id.to_string(),
            title: title.to_string(),
            notes: notes.to_string(),
            attachment_url: attachment_url.map(str::to_string),
            submitted_by: submitted_by.to_string(),
            created_at: Utc::now(),
        };

        sqlx::query(
            r#"
            INSERT INTO reports (id, shop_id, title, notes, attachment_url, submitted_by, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&report.id)
        .bind(&report.shop_id)
        .bind(&report.title)
        .bind(&report.notes)
        .bind(&report.attachment_url)
        .bind(&report.submitted_by)
        .bind(report.created_at)
        .execute(&self.pool)
        .await?;

        Ok(report)
    }

    /// Lists all reports for a shop, newest first.
    pub async fn list_for_shop(&self, shop_id: &str) -> DbResult<Vec<ShopReport>> {
        let reports = sqlx::query_as::<_, ShopReport>(
            r#"
            SELECT id, shop_id, title, notes, attachment_url, submitted_by, created_at
            FROM reports
            WHERE shop_id = ?1
            ORDER BY created_at DESC
            "#,
        )
        .bind(shop_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
