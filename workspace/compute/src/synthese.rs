//! The synthesis aggregation: fan-out ledger fetch, per-adherent and global
//! aggregation, report assembly.

pub mod adherent;
pub mod global;
pub mod report;
pub mod sources;

pub use report::{assemble, build_synthesis};
pub use sources::{fetch_ledger_sources, LedgerSources};
