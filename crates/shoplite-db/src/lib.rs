//! # shoplite-db: Storage Layer for Shoplite
//!
//! SQLite-backed storage for the shop-management core. The hosted
//! document store of the legacy deployment is an external collaborator;
//! its collections (`users`, `shops`, `inventory`, `sales`, `expenses`,
//! `transactions`, `reports`) are realized here as shop-scoped tables
//! behind repositories.
//!
//! ## Modules
//!
//! - [`pool`] - Connection pool, configuration, repository access
//! - [`migrations`] - Embedded schema migrations
//! - [`error`] - Storage and workflow error types
//! - [`repository`] - One repository per collection
//! - [`workflow`] - Checkout, invoice, reporting and provisioning flows
//!
//! ## The One Hard Rule
//!
//! Recording a sale touches two things per line: a sale-line row and the
//! product's stock. Those writes happen inside ONE transaction, with
//! stock re-validated against a fresh in-transaction read. Partial
//! application and the oversell race are impossible by construction.

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod workflow;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::{DbError, DbResult, WorkflowError, WorkflowResult};
pub use pool::{Database, DbConfig};
pub use workflow::checkout::{CheckoutReceipt, CheckoutService};
pub use workflow::reporting::FinancialOverview;
