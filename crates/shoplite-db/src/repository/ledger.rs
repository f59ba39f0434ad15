//! # Ledger Repository
//!
//! Database operations for generic income/expense ledger transactions.
//! Only expense-kind transactions feed the expense totals in the
//! financial roll-up; income-kind entries are informational.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use shoplite_core::ingest::{transaction_from_raw, RawTransaction};
use shoplite_core::{LedgerTransaction, TransactionKind};

/// Repository for ledger-transaction database operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    /// Records a new ledger transaction for a shop.
    pub async fn create(
        &self,
        shop_id: &str,
        kind: TransactionKind,
        description: &str,
        amount_cents: i64,
    ) -> DbResult<LedgerTransaction> {
        debug!(shop_id = %shop_id, amount_cents = %amount_cents, "Inserting transaction");

        let txn = LedgerTransaction {
            id: Uuid::new_v4().to_string(),
            shop_id: shop_id.to_string(),
            kind,
            description: description.to_string(),
            amount_cents,
            created_at: Utc::now(),
        };

        self.insert(&txn).await?;
        Ok(txn)
    }

    /// Imports one legacy transaction document through the lenient
    /// ingestion rules.
    pub async fn import_legacy(
        &self,
        shop_id: &str,
        raw: &RawTransaction,
    ) -> DbResult<LedgerTransaction> {
        let txn = transaction_from_raw(shop_id, raw, Utc::now());
        debug!(shop_id = %shop_id, amount_cents = %txn.amount_cents, "Importing legacy transaction");

        self.insert(&txn).await?;
        Ok(txn)
    }

    async fn insert(&self, txn: &LedgerTransaction) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO transactions (id, shop_id, kind, description, amount_cents, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&txn.id)
        .bind(&txn.shop_id)
        .bind(txn.kind)
        .bind(&txn.description)
        .bind(txn.amount_cents)
        .bind(txn.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists all transactions for a shop, newest first.
    pub async fn list_for_shop(&self, shop_id: &str) -> DbResult<Vec<LedgerTransaction>> {
        let txns = sqlx::query_as::<_, LedgerTransaction>(
            r#"
            SELECT id, shop_id, kind, description, amount_cents, created_at
            FROM transactions
            WHERE shop_id = ?1
            ORDER BY created_at DESC, id
            "#,
        )
        .bind(shop_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(shop_id = %shop_id, count = txns.len(), "Transactions listed");
        Ok(txns)
    }

    /// Deletes a transaction.
    pub async fn delete(&self, shop_id: &str, id: &str) -> DbResult<()> {
        debug!(shop_id = %shop_id, id = %id, "Deleting transaction");

        let result = sqlx::query("DELETE FROM transactions WHERE shop_id = ?1 AND id = ?2")
            .bind(shop_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Transaction", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{seed_shop, test_db};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_and_list() {
        let db = test_db().await;
        let ctx = seed_shop(&db).await;
        let shop_id = ctx.shop_id.unwrap();

        db.transactions()
            .create(&shop_id, TransactionKind::Income, "Opening float", 20000)
            .await
            .unwrap();
        db.transactions()
            .create(&shop_id, TransactionKind::Expense, "Till shortage", 1500)
            .await
            .unwrap();

        let listed = db.transactions().list_for_shop(&shop_id).await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().any(|t| t.kind == TransactionKind::Income));
        assert!(listed.iter().any(|t| t.kind == TransactionKind::Expense));
    }

    #[tokio::test]
    async fn test_legacy_import_kind_and_amount() {
        let db = test_db().await;
        let ctx = seed_shop(&db).await;
        let shop_id = ctx.shop_id.unwrap();

        let raw: RawTransaction =
            serde_json::from_value(json!({"type": "expense", "amount": "12.50"})).unwrap();
        let txn = db.transactions().import_legacy(&shop_id, &raw).await.unwrap();
        assert_eq!(txn.kind, TransactionKind::Expense);
        assert_eq!(txn.amount_cents, 1250);

        // unknown type counts as income, garbage amount as zero
        let raw: RawTransaction =
            serde_json::from_value(json!({"amount": {"nested": true}})).unwrap();
        let txn = db.transactions().import_legacy(&shop_id, &raw).await.unwrap();
        assert_eq!(txn.kind, TransactionKind::Income);
        assert_eq!(txn.amount_cents, 0);
    }
}
