//! Shared helpers for the compute test suites: an in-memory migrated
//! database and builders for each ledger record type.

pub mod helpers;
