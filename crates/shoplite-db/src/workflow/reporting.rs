//! # Reporting Workflow
//!
//! Builds the finance dashboard view for one shop: the revenue/COGS/
//! profit roll-up plus a merged, date-sorted timeline of sales, expenses
//! and ledger transactions.
//!
//! The three collections are fetched independently. A fetch that fails
//! degrades to an empty collection (with a warning) rather than taking
//! the whole dashboard down - the roll-up then simply reflects what was
//! available, the same way the legacy dashboards tolerated a feed that
//! had not arrived yet.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ts_rs::TS;

use crate::error::WorkflowResult;
use crate::pool::Database;
use shoplite_core::{
    merge_timeline, Expense, FinancialSummary, LedgerEntry, LedgerTransaction, SaleLine, SortOrder,
};

/// The finance dashboard payload for one shop.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FinancialOverview {
    pub summary: FinancialSummary,
    pub timeline: Vec<LedgerEntry>,
}

/// Computes the financial overview for a shop.
///
/// Recomputes from scratch on every call; nothing is cached or
/// incrementally maintained.
pub async fn shop_financials(
    db: &Database,
    shop_id: &str,
    order: SortOrder,
) -> WorkflowResult<FinancialOverview> {
    debug!(shop_id = %shop_id, "Computing financial overview");

    let sales: Vec<SaleLine> = match db.sales().list_for_shop(shop_id).await {
        Ok(sales) => sales,
        Err(e) => {
            warn!(shop_id = %shop_id, error = %e, "Sales fetch failed, using empty");
            Vec::new()
        }
    };

    let expenses: Vec<Expense> = match db.expenses().list_for_shop(shop_id).await {
        Ok(expenses) => expenses,
        Err(e) => {
            warn!(shop_id = %shop_id, error = %e, "Expense fetch failed, using empty");
            Vec::new()
        }
    };

    let transactions: Vec<LedgerTransaction> = match db.transactions().list_for_shop(shop_id).await
    {
        Ok(txns) => txns,
        Err(e) => {
            warn!(shop_id = %shop_id, error = %e, "Transaction fetch failed, using empty");
            Vec::new()
        }
    };

    let summary = FinancialSummary::compute(&sales, &expenses, &transactions);
    let timeline = merge_timeline(sales, expenses, transactions, order);

    Ok(FinancialOverview { summary, timeline })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{seed_product, seed_shop, test_db};
    use crate::workflow::checkout::CheckoutService;
    use shoplite_core::{CheckoutDraft, CheckoutLine, NewExpense, TransactionKind};

    #[tokio::test]
    async fn test_overview_rolls_up_all_three_collections() {
        let db = test_db().await;
        let ctx = seed_shop(&db).await;
        let shop_id = ctx.shop_id.clone().unwrap();

        // sale: 100.00 x 2, cost snapshot 60.00 each
        let p1 = seed_product(&db, &ctx, "Rice 5kg", 10000, 0, 5).await;
        CheckoutService::new(db.clone())
            .record_sale(
                &ctx,
                &CheckoutDraft {
                    customer_name: "Ama".to_string(),
                    customer_phone: "0551234567".to_string(),
                    lines: vec![CheckoutLine {
                        product_id: p1,
                        quantity: 2,
                    }],
                },
            )
            .await
            .unwrap();

        // expense 40.00 plus an expense-kind transaction 10.00;
        // income-kind is excluded from expense totals
        db.expenses()
            .create(
                &shop_id,
                &NewExpense {
                    date: chrono::Utc::now().date_naive(),
                    description: "Fuel".to_string(),
                    amount_cents: 4000,
                    category: "Transport".to_string(),
                    responsible: "Kofi".to_string(),
                },
            )
            .await
            .unwrap();
        db.transactions()
            .create(&shop_id, TransactionKind::Expense, "Till shortage", 1000)
            .await
            .unwrap();
        db.transactions()
            .create(&shop_id, TransactionKind::Income, "Opening float", 99900)
            .await
            .unwrap();

        let overview = shop_financials(&db, &shop_id, SortOrder::Descending)
            .await
            .unwrap();

        assert_eq!(overview.summary.total_revenue_cents, 20000);
        assert_eq!(overview.summary.total_cogs_cents, 12000);
        assert_eq!(overview.summary.gross_profit_cents, 8000);
        assert_eq!(overview.summary.total_expenses_cents, 5000);
        assert_eq!(overview.summary.net_profit_cents, 3000);

        // timeline holds every entry: 1 sale + 1 expense + 2 transactions
        assert_eq!(overview.timeline.len(), 4);
    }

    #[tokio::test]
    async fn test_empty_shop_overview_is_zero() {
        let db = test_db().await;
        let ctx = seed_shop(&db).await;
        let shop_id = ctx.shop_id.unwrap();

        let overview = shop_financials(&db, &shop_id, SortOrder::Ascending)
            .await
            .unwrap();
        assert_eq!(overview.summary.total_revenue_cents, 0);
        assert_eq!(overview.summary.net_profit_cents, 0);
        assert!(overview.timeline.is_empty());
    }

    #[tokio::test]
    async fn test_overview_is_shop_scoped() {
        let db = test_db().await;
        let ctx = seed_shop(&db).await;
        let other = seed_shop(&db).await;

        let p1 = seed_product(&db, &ctx, "Rice 5kg", 10000, 0, 5).await;
        CheckoutService::new(db.clone())
            .record_sale(
                &ctx,
                &CheckoutDraft {
                    customer_name: "Ama".to_string(),
                    customer_phone: "0551234567".to_string(),
                    lines: vec![CheckoutLine {
                        product_id: p1,
                        quantity: 1,
                    }],
                },
            )
            .await
            .unwrap();

        let other_overview = shop_financials(&db, &other.shop_id.unwrap(), SortOrder::Ascending)
            .await
            .unwrap();
        assert_eq!(other_overview.summary.total_revenue_cents, 0);
    }
}
