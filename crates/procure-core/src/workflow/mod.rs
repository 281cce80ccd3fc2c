//! Request lifecycle: storage, approval quorum, order numbering.

pub mod approval;
pub mod sequence;
pub mod store;

pub use approval::{ApprovalWorkflow, DecisionOutcome, ReceiptSubmission};
pub use sequence::{format_po_number, next_in_sequence, parse_sequence};
pub use store::{MemoryStore, ProcurementStore, StoreResult};
