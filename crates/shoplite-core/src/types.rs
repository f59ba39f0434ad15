//! # Domain Types
//!
//! Core domain types for the shop-management system.
//!
//! ## Shop Scope
//! Every business document (product, sale-line, expense, transaction,
//! report) carries a `shop_id`: the tenant boundary. Repositories only
//! ever issue shop-filtered queries; nothing below this layer mixes shops.
//!
//! ## Snapshot Pattern
//! A [`SaleLine`] freezes the product name, discount and cost price at the
//! moment of sale. Later edits to the product never rewrite history, and
//! COGS reporting stays faithful to what the goods actually cost.
//!
//! ## Dual-Key Identity
//! Entities carry a UUID `id` for relations; sale-lines additionally share
//! a human-readable `invoice_number` (`INV-YYYYMMDD-NNN`) that groups the
//! lines of one checkout into an invoice.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Roles & Session
// =============================================================================

/// Dashboard role assigned to a user.
///
/// Role plus shop assignment gate all downstream data visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[ts(export)]
pub enum Role {
    Admin,
    Manager,
    Finance,
    Sales,
}

impl Role {
    /// Whether this role may see and write product cost prices.
    ///
    /// Sales-role writes omit `cost_price`; the margin side of the
    /// business is Manager/Finance territory.
    pub const fn can_manage_cost_prices(&self) -> bool {
        matches!(self, Role::Admin | Role::Manager | Role::Finance)
    }

    /// Whether this role may provision users, assign roles and create shops.
    pub const fn can_provision(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Request-scoped caller identity, passed explicitly into every workflow.
///
/// The legacy app kept the signed-in user, role and shop in ambient
/// global state; here each operation receives the context it acts under.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SessionContext {
    /// Auth UID of the caller.
    pub user_id: String,
    /// Shop the caller is assigned to (Admins may have none).
    pub shop_id: Option<String>,
    pub role: Role,
    /// Name recorded as the salesperson on sales this caller records.
    pub display_name: String,
}

impl SessionContext {
    /// Returns the caller's shop id, or a validation error when the
    /// caller has no shop assignment.
    pub fn require_shop(&self) -> Result<&str, crate::error::ValidationError> {
        self.shop_id
            .as_deref()
            .ok_or(crate::error::ValidationError::Required {
                field: "shopId".to_string(),
            })
    }
}

// =============================================================================
// User
// =============================================================================

/// An account in the `users` collection. `id` is the auth UID.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub shop_id: Option<String>,
    /// Set when an Admin provisioned this account with a default
    /// credential; the user must change it before reaching a dashboard.
    pub must_reset_password: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// Input for Admin-side user provisioning.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub shop_id: Option<String>,
}

// =============================================================================
// Shop
// =============================================================================

/// A tenant in the `shops` collection.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Shop {
    pub id: String,
    pub name: String,
    pub owner_id: String,
    pub location: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the shop-scoped `inventory` collection.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Shop this product belongs to (owner scope).
    pub shop_id: String,

    /// Display name shown on dashboards and invoices.
    pub name: String,

    /// Unit price in pesewas.
    pub price_cents: i64,

    /// Cost price in pesewas. Only populated by Manager/Finance writes;
    /// Sales-role writes leave it unset.
    pub cost_price_cents: Option<i64>,

    /// Stock on hand. Never intentionally negative; the checkout
    /// transaction enforces this.
    pub stock: i64,

    /// Discount in basis points (1000 = 10%). Range 0-10000.
    pub discount_bps: u32,

    /// Category label (Food, Electronic, ...).
    pub category: String,

    /// Unit label (Piece, Kg, Box, ...).
    pub unit: String,

    /// Opaque blob-storage URL for an attached image, if any.
    pub attachment_url: Option<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Unit price with the product's own discount applied, rounded to
    /// whole pesewas.
    pub fn discounted_unit_price(&self) -> Money {
        self.price().apply_percentage_discount(self.discount_bps)
    }

    /// Checks whether the requested quantity can be taken from stock.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        quantity <= self.stock
    }
}

/// Input for creating a product. The cost price is only honored when the
/// writing role may manage cost prices.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub price_cents: i64,
    pub cost_price_cents: Option<i64>,
    pub stock: i64,
    pub discount_bps: u32,
    pub category: String,
    pub unit: String,
    pub attachment_url: Option<String>,
}

/// Input for updating a product. Same cost-price rule as [`NewProduct`]:
/// for roles that may not manage cost prices the stored value is kept.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ProductUpdate {
    pub name: String,
    pub price_cents: i64,
    pub cost_price_cents: Option<i64>,
    pub stock: i64,
    pub discount_bps: u32,
    pub category: String,
    pub unit: String,
    pub attachment_url: Option<String>,
}

// =============================================================================
// Sale-line
// =============================================================================

/// Status of a recorded sale-line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum SaleStatus {
    Pending,
    Confirmed,
}

impl Default for SaleStatus {
    fn default() -> Self {
        SaleStatus::Confirmed
    }
}

/// One product-quantity-amount record within a checkout.
///
/// All lines of one checkout share an `invoice_number`; the invoice itself
/// is a derived view ([`crate::invoice::Invoice`]), never stored.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SaleLine {
    pub id: String,
    pub shop_id: String,
    /// Shared across all lines of one checkout: `INV-YYYYMMDD-NNN`.
    pub invoice_number: String,
    pub customer_name: String,
    pub customer_phone: String,
    pub product_id: String,
    /// Product name at time of sale (frozen).
    pub product_name: String,
    pub quantity: i64,
    /// Discounted unit price x quantity, rounded to pesewas at sale time.
    pub amount_cents: i64,
    /// Discount in basis points at time of sale (frozen).
    pub discount_bps: u32,
    /// Cost price per unit at time of sale (frozen; 0 when unknown).
    pub cost_price_cents: i64,
    pub salesperson: String,
    /// Auth UID of the user who recorded the sale.
    pub recorded_by: String,
    pub status: SaleStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl SaleLine {
    /// Returns the line amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    /// Cost of goods sold for this line (cost snapshot x quantity).
    #[inline]
    pub fn cogs(&self) -> Money {
        Money::from_cents(self.cost_price_cents * self.quantity)
    }
}

// =============================================================================
// Expense
// =============================================================================

/// A shop-scoped expense entry. Independent lifecycle from sales.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Expense {
    pub id: String,
    pub shop_id: String,
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub description: String,
    pub amount_cents: i64,
    pub category: String,
    /// Person responsible for the expense.
    pub responsible: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Expense {
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// Input for recording an expense.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewExpense {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub description: String,
    pub amount_cents: i64,
    pub category: String,
    pub responsible: String,
}

// =============================================================================
// Ledger transaction
// =============================================================================

/// Direction of a generic ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A generic ledger entry in the `transactions` collection. Only
/// expense-kind transactions contribute to expense totals.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LedgerTransaction {
    pub id: String,
    pub shop_id: String,
    pub kind: TransactionKind,
    pub description: String,
    pub amount_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl LedgerTransaction {
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Shop report
// =============================================================================

/// A report submitted for a shop, with an optional blob-storage
/// attachment referenced by URL. The upload itself happens elsewhere;
/// this core only carries the opaque URL string.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShopReport {
    pub id: String,
    pub shop_id: String,
    pub title: String,
    pub notes: String,
    pub attachment_url: Option<String>,
    pub submitted_by: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price_cents: i64, discount_bps: u32, stock: i64) -> Product {
        Product {
            id: "p1".to_string(),
            shop_id: "s1".to_string(),
            name: "Sugar 1kg".to_string(),
            price_cents,
            cost_price_cents: Some(price_cents / 2),
            stock,
            discount_bps,
            category: "Food".to_string(),
            unit: "Kg".to_string(),
            attachment_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_discounted_unit_price() {
        let p = product(10000, 1000, 5); // GHS 100.00 at 10% off
        assert_eq!(p.discounted_unit_price().cents(), 9000);
    }

    #[test]
    fn test_can_fulfill() {
        let p = product(10000, 0, 5);
        assert!(p.can_fulfill(5));
        assert!(!p.can_fulfill(6));
    }

    #[test]
    fn test_sale_line_cogs() {
        let line = SaleLine {
            id: "l1".to_string(),
            shop_id: "s1".to_string(),
            invoice_number: "INV-20260826-042".to_string(),
            customer_name: "Ama".to_string(),
            customer_phone: "0550000000".to_string(),
            product_id: "p1".to_string(),
            product_name: "Sugar 1kg".to_string(),
            quantity: 3,
            amount_cents: 2700,
            discount_bps: 0,
            cost_price_cents: 600,
            salesperson: "Kofi".to_string(),
            recorded_by: "u1".to_string(),
            status: SaleStatus::Confirmed,
            created_at: Utc::now(),
        };
        assert_eq!(line.cogs().cents(), 1800);
    }

    #[test]
    fn test_role_gates() {
        assert!(Role::Manager.can_manage_cost_prices());
        assert!(Role::Finance.can_manage_cost_prices());
        assert!(!Role::Sales.can_manage_cost_prices());
        assert!(Role::Admin.can_provision());
        assert!(!Role::Manager.can_provision());
    }

    #[test]
    fn test_require_shop() {
        let ctx = SessionContext {
            user_id: "u1".to_string(),
            shop_id: None,
            role: Role::Admin,
            display_name: "Root".to_string(),
        };
        assert!(ctx.require_shop().is_err());
    }
}
