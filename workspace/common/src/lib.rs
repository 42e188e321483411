//! Common transport-layer types for the association treasury API.
//! These structs are the response payloads of the synthesis endpoints, kept
//! in a separate crate so the compute layer can build them without pulling
//! in the HTTP stack.

mod converters;
mod synthese;

pub use converters::{full_name, round_money};
pub use synthese::{
    AdherentBreakdown, ExpenseRow, FinancialSynthesis, GlobalStats, PaymentRow,
};
