//! # Checkout Pricing
//!
//! Pure pricing and pre-commit validation for a multi-line sale.
//!
//! ## Contract
//! Given the draft (`{productId, quantity}` lines plus customer info) and
//! the current products of the caller's shop:
//!
//! - discounted price = unit price reduced by the product's discount
//! - line amount = discounted price x quantity, rounded to pesewas
//! - per line: product must exist and `quantity <= stock`
//! - customer name and phone must be non-empty
//!
//! Any violation rejects the WHOLE submission before a single write; the
//! error names the offending product. The storage transaction re-validates
//! stock against a fresh read before committing, so a stale product list
//! here can only cause an early rejection, never oversell.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_customer_name, validate_customer_phone, validate_quantity};
use crate::MAX_CHECKOUT_LINES;

// =============================================================================
// Draft
// =============================================================================

/// One requested line of a checkout: which product, how many.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutLine {
    pub product_id: String,
    pub quantity: i64,
}

/// A whole checkout as submitted by the salesperson.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CheckoutDraft {
    pub customer_name: String,
    pub customer_phone: String,
    pub lines: Vec<CheckoutLine>,
}

// =============================================================================
// Priced result
// =============================================================================

/// A line after pricing: product snapshot fields plus the computed amount.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricedLine {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub discount_bps: u32,
    /// Cost per unit frozen for COGS reporting (0 when the product has no
    /// cost price recorded).
    pub cost_price_cents: i64,
    /// Discounted unit price x quantity, rounded to pesewas.
    pub amount_cents: i64,
}

/// The priced checkout: what the caller shows the user before submitting,
/// and exactly what the commit persists.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PricedCheckout {
    pub lines: Vec<PricedLine>,
    pub total_cents: i64,
}

impl PricedCheckout {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Pricing
// =============================================================================

/// Prices and validates a checkout draft against the shop's products.
///
/// Rejection is all-or-nothing: the first failing line aborts the whole
/// submission and nothing may be written.
///
/// ## Example
/// ```rust
/// # use shoplite_core::checkout::{price_checkout, CheckoutDraft, CheckoutLine};
/// # use shoplite_core::types::Product;
/// # use chrono::Utc;
/// # let product = Product {
/// #     id: "p1".into(), shop_id: "s1".into(), name: "Rice 5kg".into(),
/// #     price_cents: 10000, cost_price_cents: Some(6000), stock: 5,
/// #     discount_bps: 1000, category: "Food".into(), unit: "Bag".into(),
/// #     attachment_url: None, created_at: Utc::now(), updated_at: Utc::now(),
/// # };
/// let draft = CheckoutDraft {
///     customer_name: "Ama".into(),
///     customer_phone: "0551234567".into(),
///     lines: vec![CheckoutLine { product_id: "p1".into(), quantity: 2 }],
/// };
/// let priced = price_checkout(&draft, &[product]).unwrap();
/// // GHS 100.00 x (1 - 10%) x 2 = GHS 180.00
/// assert_eq!(priced.total_cents, 18000);
/// ```
pub fn price_checkout(draft: &CheckoutDraft, products: &[Product]) -> CoreResult<PricedCheckout> {
    validate_customer_name(&draft.customer_name)?;
    validate_customer_phone(&draft.customer_phone)?;

    if draft.lines.is_empty() {
        return Err(ValidationError::Required {
            field: "lines".to_string(),
        }
        .into());
    }

    if draft.lines.len() > MAX_CHECKOUT_LINES {
        return Err(ValidationError::TooMany {
            field: "lines".to_string(),
            max: MAX_CHECKOUT_LINES,
        }
        .into());
    }

    let mut priced = Vec::with_capacity(draft.lines.len());
    let mut total = Money::zero();

    for line in &draft.lines {
        validate_quantity(line.quantity)?;

        let product = products
            .iter()
            .find(|p| p.id == line.product_id)
            .ok_or_else(|| CoreError::ProductNotFound(line.product_id.clone()))?;

        if !product.can_fulfill(line.quantity) {
            return Err(CoreError::InsufficientStock {
                name: product.name.clone(),
                available: product.stock,
                requested: line.quantity,
            });
        }

        // Round at the line level: quantity first, then the discount, so
        // the persisted amount is exact to the pesewa.
        let amount = product
            .price()
            .multiply_quantity(line.quantity)
            .apply_percentage_discount(product.discount_bps);

        total += amount;

        priced.push(PricedLine {
            product_id: product.id.clone(),
            product_name: product.name.clone(),
            quantity: line.quantity,
            unit_price_cents: product.price_cents,
            discount_bps: product.discount_bps,
            cost_price_cents: product.cost_price_cents.unwrap_or(0),
            amount_cents: amount.cents(),
        });
    }

    Ok(PricedCheckout {
        lines: priced,
        total_cents: total.cents(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
