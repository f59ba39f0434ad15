//! # Checkout Workflow
//!
//! Records a multi-line sale as ONE atomic unit of work.
//!
//! ## Transaction Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      record_sale (one tx)                           │
//! │                                                                     │
//! │  1. Re-read the draft's products from the shop's catalog            │
//! │  2. Price + validate the whole draft (pure, all-or-nothing)         │
//! │  3. Allocate an invoice number unused in this shop                  │
//! │  4. Per line:                                                       │
//! │       INSERT sale row (frozen snapshots)                            │
//! │       UPDATE stock = stock - qty  WHERE ... AND stock >= qty        │
//! │          └── 0 rows touched ⇒ concurrent sale won; ROLLBACK         │
//! │  5. COMMIT                                                          │
//! │                                                                     │
//! │  Any failure anywhere rolls back everything: no sale rows without   │
//! │  their stock decrement, no decrement without its sale rows.         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The guarded UPDATE in step 4 is what makes concurrent oversell
//! impossible even though pricing read the stock a moment earlier.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{DbError, WorkflowResult};
use crate::pool::Database;
use shoplite_core::{
    price_checkout, CheckoutDraft, CoreError, Product, SaleLine, SaleStatus, SessionContext,
};

/// Regeneration attempts before giving up on a same-day invoice number.
const MAX_INVOICE_ATTEMPTS: u32 = 5;

/// What the caller gets back from a committed checkout.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutReceipt {
    /// Invoice number shared by every line of this checkout.
    pub invoice_number: String,
    /// Sum of the persisted line amounts, in pesewas.
    pub total_cents: i64,
    /// The sale-lines exactly as persisted.
    pub lines: Vec<SaleLine>,
}

/// Service that records checkouts transactionally.
///
/// ## Usage
/// ```rust,ignore
/// let service = CheckoutService::new(db);
/// let receipt = service.record_sale(&ctx, &draft).await?;
/// println!("invoice {}", receipt.invoice_number);
/// ```
#[derive(Debug, Clone)]
pub struct CheckoutService {
    db: Database,
}

impl CheckoutService {
    /// Creates a new CheckoutService.
    pub fn new(db: Database) -> Self {
        CheckoutService { db }
    }

    /// Records a sale: prices the draft, allocates an invoice number,
    /// inserts one row per line and decrements stock, all in one
    /// transaction.
    ///
    /// ## Errors
    /// * `WorkflowError::Domain` - validation, unknown product, or
    ///   insufficient stock; nothing was written
    /// * `WorkflowError::Store` - the database failed; the transaction
    ///   rolled back and the submission may be retried as-is
    pub async fn record_sale(
        &self,
        ctx: &SessionContext,
        draft: &CheckoutDraft,
    ) -> WorkflowResult<CheckoutReceipt> {
        let shop_id = ctx.require_shop()?.to_string();

        debug!(
            shop_id = %shop_id,
            lines = draft.lines.len(),
            "Recording sale"
        );

        let mut tx = self.db.pool().begin().await.map_err(DbError::from)?;

        // Fresh product reads inside the transaction; the caller's view
        // of the catalog may be stale.
        let mut products: Vec<Product> = Vec::with_capacity(draft.lines.len());
        for line in &draft.lines {
            let product = sqlx::query_as::<_, Product>(
                r#"
                SELECT id, shop_id, name, price_cents, cost_price_cents, stock,
                       discount_bps, category, unit, attachment_url,
                       created_at, updated_at
                FROM inventory
                WHERE shop_id = ?1 AND id = ?2
                "#,
            )
            .bind(&shop_id)
            .bind(&line.product_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(DbError::from)?;

            match product {
                Some(p) => products.push(p),
                None => return Err(CoreError::ProductNotFound(line.product_id.clone()).into()),
            }
        }

        let priced = price_checkout(draft, &products)?;

        let now = Utc::now();
        let invoice_number = allocate_invoice_number(&mut tx, &shop_id, now).await?;

        let mut lines = Vec::with_capacity(priced.lines.len());
        for line in &priced.lines {
            let sale = SaleLine {
                id: Uuid::new_v4().to_string(),
                shop_id: shop_id.clone(),
                invoice_number: invoice_number.clone(),
                customer_name: draft.customer_name.trim().to_string(),
                customer_phone: draft.customer_phone.trim().to_string(),
                product_id: line.product_id.clone(),
                product_name: line.product_name.clone(),
                quantity: line.quantity,
                amount_cents: line.amount_cents,
                discount_bps: line.discount_bps,
                cost_price_cents: line.cost_price_cents,
                salesperson: ctx.display_name.clone(),
                recorded_by: ctx.user_id.clone(),
                status: SaleStatus::Confirmed,
                created_at: now,
            };

            sqlx::query(
                r#"
                INSERT INTO sales (
                    id, shop_id, invoice_number, customer_name, customer_phone,
                    product_id, product_name, quantity, amount_cents,
                    discount_bps, cost_price_cents, salesperson, recorded_by,
                    status, created_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
                "#,
            )
            .bind(&sale.id)
            .bind(&sale.shop_id)
            .bind(&sale.invoice_number)
            .bind(&sale.customer_name)
            .bind(&sale.customer_phone)
            .bind(&sale.product_id)
            .bind(&sale.product_name)
            .bind(sale.quantity)
            .bind(sale.amount_cents)
            .bind(sale.discount_bps)
            .bind(sale.cost_price_cents)
            .bind(&sale.salesperson)
            .bind(&sale.recorded_by)
            .bind(sale.status)
            .bind(sale.created_at)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

            // Guarded decrement. A concurrent checkout may have taken the
            // stock between our read and this write; 0 rows means it did.
            let result = sqlx::query(
                r#"
                UPDATE inventory
                SET stock = stock - ?3, updated_at = ?4
                WHERE shop_id = ?1 AND id = ?2 AND stock >= ?3
                "#,
            )
            .bind(&shop_id)
            .bind(&sale.product_id)
            .bind(sale.quantity)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

            if result.rows_affected() == 0 {
                warn!(
                    shop_id = %shop_id,
                    product_id = %sale.product_id,
                    "Stock taken by a concurrent sale, rolling back"
                );
                let available: i64 =
                    sqlx::query_scalar("SELECT stock FROM inventory WHERE shop_id = ?1 AND id = ?2")
                        .bind(&shop_id)
                        .bind(&sale.product_id)
                        .fetch_optional(&mut *tx)
                        .await
                        .map_err(DbError::from)?
                        .unwrap_or(0);

                tx.rollback().await.map_err(DbError::from)?;
                return Err(CoreError::InsufficientStock {
                    name: sale.product_name,
                    available,
                    requested: sale.quantity,
                }
                .into());
            }

            lines.push(sale);
        }

        tx.commit().await.map_err(DbError::from)?;

        info!(
            shop_id = %shop_id,
            invoice_number = %invoice_number,
            total_cents = priced.total_cents,
            "Sale recorded"
        );

        Ok(CheckoutReceipt {
            invoice_number,
            total_cents: priced.total_cents,
            lines,
        })
    }
}

/// Picks an invoice number not yet used in this shop today.
///
/// The suffix is random, so same-day collisions are possible; each
/// candidate is checked against existing sales inside the transaction and
/// regenerated on a hit, up to [`MAX_INVOICE_ATTEMPTS`] times.
async fn allocate_invoice_number(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    shop_id: &str,
    now: DateTime<Utc>,
) -> WorkflowResult<String> {
    allocate_from(tx, shop_id, || generate_invoice_number(now)).await
}

/// Allocation loop over an arbitrary candidate source. Split out so the
/// collision and exhaustion branches can be driven without depending on
/// the thread-local RNG.
async fn allocate_from<F>(
    tx: &mut sqlx::Transaction<'_, sqlx::Sqlite>,
    shop_id: &str,
    mut next_candidate: F,
) -> WorkflowResult<String>
where
    F: FnMut() -> String,
{
    for attempt in 0..MAX_INVOICE_ATTEMPTS {
        let candidate = next_candidate();

        let taken: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sales WHERE shop_id = ?1 AND invoice_number = ?2",
        )
        .bind(shop_id)
        .bind(&candidate)
        .fetch_one(&mut **tx)
        .await
        .map_err(DbError::from)?;

        if taken == 0 {
            return Ok(candidate);
        }

        debug!(
            candidate = %candidate,
            attempt = attempt + 1,
            "Invoice number already used, regenerating"
        );
    }

    Err(DbError::Internal(format!(
        "no free invoice number for shop {shop_id} after {MAX_INVOICE_ATTEMPTS} attempts"
    ))
    .into())
}

/// Formats an invoice number: `INV-YYYYMMDD-NNN` with a random 3-digit
/// suffix.
fn generate_invoice_number(now: DateTime<Utc>) -> String {
    let suffix: u32 = rand::thread_rng().gen_range(0..1000);
    format!("INV-{}-{:03}", now.format("%Y%m%d"), suffix)
}

// =============================================================================
// Unit Tests
// =============================================================================
