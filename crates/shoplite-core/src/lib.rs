//! # shoplite-core: Pure Business Logic for Shoplite
//!
//! This crate is the heart of the shop-management system. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Shoplite Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Web Frontend (per-role dashboards)             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ shoplite-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐ ┌───────────┐ ┌───────────┐ ┌───────────┐     │   │
//! │  │   │   types   │ │   money   │ │ checkout  │ │  invoice  │     │   │
//! │  │   └───────────┘ └───────────┘ └───────────┘ └───────────┘     │   │
//! │  │   ┌───────────┐ ┌───────────┐ ┌───────────┐                   │   │
//! │  │   │  report   │ │  ingest   │ │ validation│                   │   │
//! │  │   └───────────┘ └───────────┘ └───────────┘                   │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 shoplite-db (Storage Layer)                     │   │
//! │  │        SQLite repositories, migrations, checkout workflow       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, SaleLine, Expense, User, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level validation rules
//! - [`checkout`] - Multi-line sale pricing and pre-commit validation
//! - [`invoice`] - Invoice as a derived view over sale-lines
//! - [`report`] - Financial aggregation (revenue, COGS, profit)
//! - [`ingest`] - Lenient ingestion of legacy store documents
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output - no hidden state
//! 2. **No I/O**: database and network access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are pesewas (i64 cents)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod ingest;
pub mod invoice;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{price_checkout, CheckoutDraft, CheckoutLine, PricedCheckout, PricedLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use invoice::{Invoice, InvoiceLine};
pub use money::Money;
pub use report::{merge_timeline, FinancialSummary, LedgerEntry, SortOrder};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of line items in a single checkout.
///
/// The legacy sale form let the cashier add rows without bound; this cap
/// keeps a mistyped submission from fanning out into hundreds of writes.
pub const MAX_CHECKOUT_LINES: usize = 50;

/// Maximum quantity of a single product per sale-line.
///
/// Guards against fat-finger quantities (1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
