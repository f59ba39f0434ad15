//! # Repository Layer
//!
//! Data access repositories, one per table. Each repository holds a
//! cloned pool handle and exposes async CRUD methods returning
//! `DbResult`. Cross-table workflows that need transactional guarantees
//! live in the [`crate::workflow`] module instead.

pub mod expense;
pub mod inventory;
pub mod ledger;
pub mod report;
pub mod sale;
pub mod shop;
pub mod user;

pub use expense::ExpenseRepository;
pub use inventory::ProductRepository;
pub use ledger::TransactionRepository;
pub use report::ReportRepository;
pub use sale::SaleRepository;
pub use shop::ShopRepository;
pub use user::UserRepository;
