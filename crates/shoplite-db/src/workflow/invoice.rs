//! # Invoice Workflow
//!
//! Invoices are never stored: an invoice is the sale-lines that share an
//! invoice number within one shop, aggregated on demand. Re-running the
//! lookup always yields the same view of the same underlying lines.

use tracing::debug;

use crate::error::WorkflowResult;
use crate::pool::Database;
use shoplite_core::{CoreError, Invoice};

/// Loads the invoice view for one invoice number within a shop.
///
/// ## Errors
/// * `WorkflowError::Domain(CoreError::InvoiceNotFound)` - no sale-lines
///   carry this number in this shop (numbers are only unique per shop, so
///   another shop's invoice is invisible here)
pub async fn load_invoice(
    db: &Database,
    shop_id: &str,
    invoice_number: &str,
) -> WorkflowResult<Invoice> {
    debug!(shop_id = %shop_id, invoice_number = %invoice_number, "Loading invoice");

    let lines = db.sales().by_invoice(shop_id, invoice_number).await?;

    if lines.is_empty() {
        return Err(CoreError::InvoiceNotFound(invoice_number.to_string()).into());
    }

    let invoice = Invoice::from_lines(invoice_number, lines)?;
    Ok(invoice)
}

// =============================================================================
// Unit Tests
// =============================================================================
