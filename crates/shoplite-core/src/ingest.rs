//! # Legacy Document Ingestion
//!
//! The hosted document store this system grew out of kept un-typed
//! fields: an `amount` could be a number, a numeric string, `"abc"`, or
//! missing entirely. The dashboards coerced leniently (anything
//! unparsable counted as zero) rather than erroring.
//!
//! That policy is deliberate and is preserved here - but applied exactly
//! once, at this ingestion boundary, instead of scattered per call site.
//! Everything past this module works on typed entities with integer
//! pesewa amounts.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::money::Money;
use crate::types::{Expense, LedgerTransaction, TransactionKind};

// =============================================================================
// Amount coercion
// =============================================================================

/// Normalizes an untyped `amount` field to Money.
///
/// Numbers and numeric strings are interpreted as major currency units
/// (GHS) and rounded to pesewas; anything else - missing, null, `"abc"`,
/// arrays - contributes zero. This is the lenient-parsing policy of the
/// legacy store, not an error path.
pub fn amount_or_zero(value: &Value) -> Money {
    let major = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match major {
        Some(f) if f.is_finite() => Money::from_cents((f * 100.0).round() as i64),
        _ => Money::zero(),
    }
}

// =============================================================================
// Raw documents
// =============================================================================

/// An expense document as it appears in the legacy store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExpense {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: Value,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub responsible: String,
}

/// A ledger transaction document as it appears in the legacy store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    /// `"expense"` marks outgoing money; anything else counts as income.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub amount: Value,
}

/// Converts a raw expense into a typed entity.
///
/// An unparsable or missing `date` falls back to the day the document was
/// received; the amount goes through [`amount_or_zero`].
pub fn expense_from_raw(shop_id: &str, raw: &RawExpense, received_at: DateTime<Utc>) -> Expense {
    let date = raw
        .date
        .as_deref()
        .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
        .unwrap_or_else(|| received_at.date_naive());

    Expense {
        id: Uuid::new_v4().to_string(),
        shop_id: shop_id.to_string(),
        date,
        description: raw.description.trim().to_string(),
        amount_cents: amount_or_zero(&raw.amount).cents(),
        category: if raw.category.trim().is_empty() {
            "Others".to_string()
        } else {
            raw.category.trim().to_string()
        },
        responsible: raw.responsible.trim().to_string(),
        created_at: received_at,
    }
}

/// Converts a raw ledger transaction into a typed entity.
pub fn transaction_from_raw(
    shop_id: &str,
    raw: &RawTransaction,
    received_at: DateTime<Utc>,
) -> LedgerTransaction {
    let kind = match raw.kind.as_deref() {
        Some("expense") => TransactionKind::Expense,
        _ => TransactionKind::Income,
    };

    LedgerTransaction {
        id: Uuid::new_v4().to_string(),
        shop_id: shop_id.to_string(),
        kind,
        description: raw.description.trim().to_string(),
        amount_cents: amount_or_zero(&raw.amount).cents(),
        created_at: received_at,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_amount_or_zero_numbers() {
        assert_eq!(amount_or_zero(&json!(40)).cents(), 4000);
        assert_eq!(amount_or_zero(&json!(10.5)).cents(), 1050);
        assert_eq!(amount_or_zero(&json!("25.99")).cents(), 2599);
    }

    #[test]
    fn test_amount_or_zero_garbage() {
        assert_eq!(amount_or_zero(&json!("abc")).cents(), 0);
        assert_eq!(amount_or_zero(&json!(null)).cents(), 0);
        assert_eq!(amount_or_zero(&json!([1, 2])).cents(), 0);
        assert_eq!(amount_or_zero(&json!({})).cents(), 0);
    }

    #[test]
    fn test_lenient_expense_total() {
        // [{amount:40},{amount:"bad"},{amount:10}] -> total 50
        let now = Utc::now();
        let raws: Vec<RawExpense> = vec![
            serde_json::from_value(json!({"amount": 40})).unwrap(),
            serde_json::from_value(json!({"amount": "bad"})).unwrap(),
            serde_json::from_value(json!({"amount": 10})).unwrap(),
        ];

        let total: i64 = raws
            .iter()
            .map(|r| expense_from_raw("s1", r, now).amount_cents)
            .sum();
        assert_eq!(total, 5000);
    }

    #[test]
    fn test_expense_date_fallback() {
        let received = Utc::now();
        let raw: RawExpense =
            serde_json::from_value(json!({"date": "not-a-date", "amount": 5})).unwrap();
        let expense = expense_from_raw("s1", &raw, received);
        assert_eq!(expense.date, received.date_naive());

        let raw: RawExpense =
            serde_json::from_value(json!({"date": "2026-08-01", "amount": 5})).unwrap();
        let expense = expense_from_raw("s1", &raw, received);
        assert_eq!(expense.date.to_string(), "2026-08-01");
    }

    #[test]
    fn test_transaction_kind_mapping() {
        let now = Utc::now();
        let raw: RawTransaction =
            serde_json::from_value(json!({"type": "expense", "amount": 12})).unwrap();
        let txn = transaction_from_raw("s1", &raw, now);
        assert_eq!(txn.kind, TransactionKind::Expense);
        assert_eq!(txn.amount_cents, 1200);

        let raw: RawTransaction = serde_json::from_value(json!({"amount": 7})).unwrap();
        let txn = transaction_from_raw("s1", &raw, now);
        assert_eq!(txn.kind, TransactionKind::Income);
    }
}
