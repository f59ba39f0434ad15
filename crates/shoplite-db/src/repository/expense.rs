//! # Expense Repository
//!
//! Database operations for shop-scoped expenses. Expenses have their own
//! lifecycle, fully independent of sales: recording or deleting one never
//! touches inventory or the sales ledger.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use shoplite_core::ingest::{expense_from_raw, RawExpense};
use shoplite_core::{Expense, NewExpense};

/// Repository for expense database operations.
#[derive(Debug, Clone)]
pub struct ExpenseRepository {
    pool: SqlitePool,
}

impl ExpenseRepository {
    /// Creates a new ExpenseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ExpenseRepository { pool }
    }

    /// Records a new expense for a shop.
    pub async fn create(&self, shop_id: &str, input: &NewExpense) -> DbResult<Expense> {
        debug!(shop_id = %shop_id, category = %input.category, "Inserting expense");

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            shop_id: shop_id.to_string(),
            date: input.date,
            description: input.description.clone(),
            amount_cents: input.amount_cents,
            category: input.category.clone(),
            responsible: input.responsible.clone(),
            created_at: Utc::now(),
        };

        self.insert(&expense).await?;
        Ok(expense)
    }

    /// Imports one legacy expense document, coercing its un-typed fields
    /// through the lenient ingestion rules.
    pub async fn import_legacy(&self, shop_id: &str, raw: &RawExpense) -> DbResult<Expense> {
        let expense = expense_from_raw(shop_id, raw, Utc::now());
        debug!(shop_id = %shop_id, amount_cents = %expense.amount_cents, "Importing legacy expense");

        self.insert(&expense).await?;
        Ok(expense)
    }

    async fn insert(&self, expense: &Expense) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO expenses (
                id, shop_id, date, description, amount_cents,
                category, responsible, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&expense.id)
        .bind(&expense.shop_id)
        .bind(expense.date)
        .bind(&expense.description)
        .bind(expense.amount_cents)
        .bind(&expense.category)
        .bind(&expense.responsible)
        .bind(expense.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists all expenses for a shop, newest date first.
    pub async fn list_for_shop(&self, shop_id: &str) -> DbResult<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, shop_id, date, description, amount_cents,
                   category, responsible, created_at
            FROM expenses
            WHERE shop_id = ?1
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(shop_id)
        .fetch_all(&self.pool)
        .await?;

        debug!(shop_id = %shop_id, count = expenses.len(), "Expenses listed");
        Ok(expenses)
    }

    /// Lists expenses within an inclusive date range.
    pub async fn list_in_range(
        &self,
        shop_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DbResult<Vec<Expense>> {
        let expenses = sqlx::query_as::<_, Expense>(
            r#"
            SELECT id, shop_id, date, description, amount_cents,
                   category, responsible, created_at
            FROM expenses
            WHERE shop_id = ?1 AND date >= ?2 AND date <= ?3
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(shop_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    /// Updates an expense in place.
    pub async fn update(&self, shop_id: &str, id: &str, input: &NewExpense) -> DbResult<()> {
        debug!(shop_id = %shop_id, id = %id, "Updating expense");

        let result = sqlx::query(
            r#"
            UPDATE expenses SET
                date = ?3,
                description = ?4,
                amount_cents = ?5,
                category = ?6,
                responsible = ?7
            WHERE shop_id = ?1 AND id = ?2
            "#,
        )
        .bind(shop_id)
        .bind(id)
        .bind(input.date)
        .bind(&input.description)
        .bind(input.amount_cents)
        .bind(&input.category)
        .bind(&input.responsible)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Expense", id));
        }

        Ok(())
    }

    /// Deletes an expense.
    pub async fn delete(&self, shop_id: &str, id: &str) -> DbResult<()> {
        debug!(shop_id = %shop_id, id = %id, "Deleting expense");

        let result = sqlx::query("DELETE FROM expenses WHERE shop_id = ?1 AND id = ?2")
            .bind(shop_id)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Expense", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
