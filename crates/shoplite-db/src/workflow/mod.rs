//! # Workflow Layer
//!
//! Multi-step operations that combine core pricing/policy with storage.
//! Anything touching more than one table in a single logical step lives
//! here, inside an explicit transaction; single-table access stays in
//! [`crate::repository`].

pub mod checkout;
pub mod invoice;
pub mod provisioning;
pub mod reporting;
