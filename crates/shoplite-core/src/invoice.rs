//! # Invoice View
//!
//! An invoice is a DERIVED view: the set of sale-lines sharing an invoice
//! number, folded into line items and a total. It is never persisted and
//! never mutated - re-deriving it from the same lines always yields the
//! same result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::SaleLine;

/// One displayable line of an invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceLine {
    pub product_name: String,
    pub quantity: i64,
    /// Effective unit price in pesewas, derived as amount / quantity
    /// (floor). Display-only; the stored line amount stays authoritative.
    pub unit_price_cents: i64,
    pub discount_bps: u32,
    pub amount_cents: i64,
}

/// A folded invoice: metadata from the first line, plus line items and
/// the grand total.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Invoice {
    pub invoice_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub salesperson: String,
    #[ts(as = "String")]
    pub issued_at: DateTime<Utc>,
    pub lines: Vec<InvoiceLine>,
    pub total_cents: i64,
}

impl Invoice {
    /// Folds the sale-lines of one checkout into an invoice.
    ///
    /// Customer, salesperson and date are taken from the first retrieved
    /// line - all lines of a checkout share these fields by construction.
    /// An empty set means the invoice number resolves to nothing.
    pub fn from_lines(invoice_number: &str, lines: Vec<SaleLine>) -> CoreResult<Invoice> {
        let first = lines
            .first()
            .ok_or_else(|| CoreError::InvoiceNotFound(invoice_number.to_string()))?;

        let customer_name = first.customer_name.clone();
        let customer_phone = first.customer_phone.clone();
        let salesperson = first.salesperson.clone();
        let issued_at = first.created_at;

        let mut total = Money::zero();
        let mut items = Vec::with_capacity(lines.len());

        for line in &lines {
            total += line.amount();

            let unit_price = if line.quantity > 0 {
                line.amount_cents / line.quantity
            } else {
                0
            };

            items.push(InvoiceLine {
                product_name: line.product_name.clone(),
                quantity: line.quantity,
                unit_price_cents: unit_price,
                discount_bps: line.discount_bps,
                amount_cents: line.amount_cents,
            });
        }

        Ok(Invoice {
            invoice_number: invoice_number.to_string(),
            customer_name,
            customer_phone,
            salesperson,
            issued_at,
            lines: items,
            total_cents: total.cents(),
        })
    }

    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SaleStatus;

    fn line(invoice: &str, product: &str, quantity: i64, amount_cents: i64) -> SaleLine {
        SaleLine {
            id: uuid::Uuid::new_v4().to_string(),
            shop_id: "s1".to_string(),
            invoice_number: invoice.to_string(),
            customer_name: "Ama Mensah".to_string(),
            customer_phone: "0551234567".to_string(),
            product_id: product.to_string(),
            product_name: format!("Product {product}"),
            quantity,
            amount_cents,
            discount_bps: 0,
            cost_price_cents: 0,
            salesperson: "Kofi".to_string(),
            recorded_by: "u1".to_string(),
            status: SaleStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_fold_two_lines() {
        // amounts 180.00 and 50.00 -> total 230.00
        let lines = vec![
            line("INV-20260826-042", "p1", 2, 18000),
            line("INV-20260826-042", "p2", 1, 5000),
        ];

        let invoice = Invoice::from_lines("INV-20260826-042", lines).unwrap();
        assert_eq!(invoice.total_cents, 23000);
        assert_eq!(invoice.lines.len(), 2);
        assert_eq!(invoice.customer_name, "Ama Mensah");
        // per-line unit price = amount / quantity
        assert_eq!(invoice.lines[0].unit_price_cents, 9000);
        assert_eq!(invoice.lines[1].unit_price_cents, 5000);
    }

    #[test]
    fn test_empty_set_is_not_found() {
        let err = Invoice::from_lines("INV-20260826-999", Vec::new()).unwrap_err();
        assert!(matches!(err, CoreError::InvoiceNotFound(_)));
    }

    #[test]
    fn test_fold_is_idempotent() {
        let lines = vec![
            line("INV-20260826-007", "p1", 3, 2700),
            line("INV-20260826-007", "p2", 1, 1500),
        ];

        let a = Invoice::from_lines("INV-20260826-007", lines.clone()).unwrap();
        let b = Invoice::from_lines("INV-20260826-007", lines).unwrap();

        assert_eq!(a.total_cents, b.total_cents);
        assert_eq!(a.lines, b.lines);
    }

    #[test]
    fn test_zero_quantity_line_does_not_divide() {
        let lines = vec![line("INV-20260826-001", "p1", 0, 0)];
        let invoice = Invoice::from_lines("INV-20260826-001", lines).unwrap();
        assert_eq!(invoice.lines[0].unit_price_cents, 0);
    }
}
