//! Data models for procurement requests, orders, and extracted fields.

pub mod config;
pub mod fields;
pub mod order;
pub mod request;

pub use config::ProcureConfig;
pub use fields::{DocumentKind, ExtractedFields, ExtractedItem};
pub use order::{ApprovalEntry, OrderSnapshot, OrderTerms, PurchaseOrder};
pub use request::{
    Approval, ApprovalLevel, Decision, NewRequest, PurchaseRequest, RequestStatus, Requester,
    Urgency,
};
