//! # Financial Aggregation
//!
//! Pure roll-ups over a shop's sale-lines, expenses and ledger
//! transactions:
//!
//! - revenue  = Σ sale amounts
//! - COGS     = Σ (cost-price snapshot x quantity)
//! - gross    = revenue - COGS
//! - expenses = Σ expense amounts + Σ expense-kind transaction amounts
//! - net      = gross - expenses
//!
//! The three collections arrive over independent store subscriptions with
//! no ordering guarantee between them, so every aggregation here
//! recomputes from scratch over whatever is currently materialized -
//! never incrementally - and tolerates transient inconsistency (a sale
//! visible before its stock decrement, or vice versa).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Expense, LedgerTransaction, SaleLine, TransactionKind};

// =============================================================================
// Summary
// =============================================================================

/// Revenue/COGS/profit roll-up for one shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct FinancialSummary {
    pub total_revenue_cents: i64,
    pub total_cogs_cents: i64,
    pub gross_profit_cents: i64,
    pub total_expenses_cents: i64,
    pub net_profit_cents: i64,
}

impl FinancialSummary {
    /// Computes the summary from the shop's materialized collections.
    pub fn compute(
        sales: &[SaleLine],
        expenses: &[Expense],
        transactions: &[LedgerTransaction],
    ) -> FinancialSummary {
        let revenue: Money = sales.iter().map(|s| s.amount()).sum();
        let cogs: Money = sales.iter().map(|s| s.cogs()).sum();
        let gross = revenue - cogs;

        let expense_total: Money = expenses
            .iter()
            .map(|e| e.amount())
            .chain(
                transactions
                    .iter()
                    .filter(|t| t.kind == TransactionKind::Expense)
                    .map(|t| t.amount()),
            )
            .sum();

        let net = gross - expense_total;

        FinancialSummary {
            total_revenue_cents: revenue.cents(),
            total_cogs_cents: cogs.cents(),
            gross_profit_cents: gross.cents(),
            total_expenses_cents: expense_total.cents(),
            net_profit_cents: net.cents(),
        }
    }
}

// =============================================================================
// Merged Timeline
// =============================================================================

/// Sort direction for the merged timeline, caller-selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// One entry of the merged timeline, tagged with its kind for display.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "entryType", content = "entry", rename_all = "lowercase")]
#[ts(export)]
pub enum LedgerEntry {
    Sale(SaleLine),
    Expense(Expense),
    Transaction(LedgerTransaction),
}

impl LedgerEntry {
    /// The timestamp the timeline sorts on.
    pub fn date(&self) -> DateTime<Utc> {
        match self {
            LedgerEntry::Sale(s) => s.created_at,
            LedgerEntry::Expense(e) => e.created_at,
            LedgerEntry::Transaction(t) => t.created_at,
        }
    }

    /// Signed-less amount of the entry, for display.
    pub fn amount(&self) -> Money {
        match self {
            LedgerEntry::Sale(s) => s.amount(),
            LedgerEntry::Expense(e) => e.amount(),
            LedgerEntry::Transaction(t) => t.amount(),
        }
    }
}

/// Merges the three collections into one date-sorted sequence.
pub fn merge_timeline(
    sales: Vec<SaleLine>,
    expenses: Vec<Expense>,
    transactions: Vec<LedgerTransaction>,
    order: SortOrder,
) -> Vec<LedgerEntry> {
    let mut entries: Vec<LedgerEntry> = sales
        .into_iter()
        .map(LedgerEntry::Sale)
        .chain(expenses.into_iter().map(LedgerEntry::Expense))
        .chain(transactions.into_iter().map(LedgerEntry::Transaction))
        .collect();

    // stable sort keeps retrieval order between equal timestamps
    match order {
        SortOrder::Ascending => entries.sort_by_key(|e| e.date()),
        SortOrder::Descending => {
            entries.sort_by_key(|e| e.date());
            entries.reverse();
        }
    }

    entries
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SaleStatus;
    use chrono::{Duration, NaiveDate};

    fn sale(amount_cents: i64, cost_cents: i64, quantity: i64, at: DateTime<Utc>) -> SaleLine {
        SaleLine {
            id: uuid::Uuid::new_v4().to_string(),
            shop_id: "s1".to_string(),
            invoice_number: "INV-20260826-001".to_string(),
            customer_name: "Ama".to_string(),
            customer_phone: "0551234567".to_string(),
            product_id: "p1".to_string(),
            product_name: "Rice 5kg".to_string(),
            quantity,
            amount_cents,
            discount_bps: 0,
            cost_price_cents: cost_cents,
            salesperson: "Kofi".to_string(),
            recorded_by: "u1".to_string(),
            status: SaleStatus::Confirmed,
            created_at: at,
        }
    }

    fn expense(amount_cents: i64, at: DateTime<Utc>) -> Expense {
        Expense {
            id: uuid::Uuid::new_v4().to_string(),
            shop_id: "s1".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 8, 26).unwrap(),
            description: "Fuel".to_string(),
            amount_cents,
            category: "Transport".to_string(),
            responsible: "Kofi".to_string(),
            created_at: at,
        }
    }

    fn transaction(kind: TransactionKind, amount_cents: i64, at: DateTime<Utc>) -> LedgerTransaction {
        LedgerTransaction {
            id: uuid::Uuid::new_v4().to_string(),
            shop_id: "s1".to_string(),
            kind,
            description: "Ledger".to_string(),
            amount_cents,
            created_at: at,
        }
    }

    #[test]
    fn test_summary_totals() {
        let now = Utc::now();
        // revenue 230.00, COGS 2x60.00 = 120.00
        let sales = vec![sale(18000, 6000, 2, now), sale(5000, 0, 1, now)];
        // expenses 40.00 + expense-kind txn 10.00; income txn excluded
        let expenses = vec![expense(4000, now)];
        let transactions = vec![
            transaction(TransactionKind::Expense, 1000, now),
            transaction(TransactionKind::Income, 99900, now),
        ];

        let summary = FinancialSummary::compute(&sales, &expenses, &transactions);
        assert_eq!(summary.total_revenue_cents, 23000);
        assert_eq!(summary.total_cogs_cents, 12000);
        assert_eq!(summary.gross_profit_cents, 11000);
        assert_eq!(summary.total_expenses_cents, 5000);
        assert_eq!(summary.net_profit_cents, 6000);
    }

    #[test]
    fn test_summary_of_nothing_is_zero() {
        let summary = FinancialSummary::compute(&[], &[], &[]);
        assert_eq!(summary.total_revenue_cents, 0);
        assert_eq!(summary.net_profit_cents, 0);
    }

    #[test]
    fn test_net_profit_can_go_negative() {
        let now = Utc::now();
        let sales = vec![sale(1000, 900, 1, now)];
        let expenses = vec![expense(5000, now)];

        let summary = FinancialSummary::compute(&sales, &expenses, &[]);
        assert_eq!(summary.gross_profit_cents, 100);
        assert_eq!(summary.net_profit_cents, -4900);
    }

    #[test]
    fn test_timeline_sorting_both_ways() {
        let t0 = Utc::now();
        let t1 = t0 + Duration::minutes(1);
        let t2 = t0 + Duration::minutes(2);

        let sales = vec![sale(1000, 0, 1, t1)];
        let expenses = vec![expense(2000, t0)];
        let transactions = vec![transaction(TransactionKind::Income, 3000, t2)];

        let asc = merge_timeline(
            sales.clone(),
            expenses.clone(),
            transactions.clone(),
            SortOrder::Ascending,
        );
        let dates: Vec<_> = asc.iter().map(|e| e.date()).collect();
        assert_eq!(dates, vec![t0, t1, t2]);

        let desc = merge_timeline(sales, expenses, transactions, SortOrder::Descending);
        let dates: Vec<_> = desc.iter().map(|e| e.date()).collect();
        assert_eq!(dates, vec![t2, t1, t0]);
    }

    #[test]
    fn test_timeline_tags_kinds() {
        let now = Utc::now();
        let entries = merge_timeline(
            vec![sale(1000, 0, 1, now)],
            vec![expense(2000, now)],
            vec![],
            SortOrder::Ascending,
        );
        assert!(entries.iter().any(|e| matches!(e, LedgerEntry::Sale(_))));
        assert!(entries.iter().any(|e| matches!(e, LedgerEntry::Expense(_))));
    }
}
