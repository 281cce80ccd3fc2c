//! Core library for procurement request processing.
//!
//! This crate provides:
//! - Document text extraction (PDF, Word, plain text)
//! - Layered field extraction from proformas and receipts
//! - Two-level approval workflow with purchase order materialization
//! - PO vs receipt reconciliation with graded discrepancies

pub mod error;
pub mod extract;
pub mod models;
pub mod reconcile;
pub mod text;
pub mod workflow;

pub use error::{ProcureError, Result, StoreError, TextError, WorkflowError};
pub use extract::{DocumentProcessor, FieldExtractionPipeline};
pub use models::{
    Approval, ApprovalLevel, Decision, DocumentKind, ExtractedFields, ExtractedItem, NewRequest,
    ProcureConfig, PurchaseOrder, PurchaseRequest, RequestStatus, Requester, Urgency,
};
pub use reconcile::{
    reconcile, Discrepancy, PoSnapshot, ReceiptValidator, ReconciliationReport, Severity,
};
pub use text::{extract_text, DocumentFormat};
pub use workflow::{ApprovalWorkflow, MemoryStore, ProcurementStore};

/// Re-export the assisted-extraction backend types.
pub use procure_assist::{AssistBackend, OpenAiBackend, OpenAiConfig};
