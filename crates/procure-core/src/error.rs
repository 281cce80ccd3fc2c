//! Error types for the procure-core library.

use thiserror::Error;

/// Main error type for the procure library.
#[derive(Error, Debug)]
pub enum ProcureError {
    /// Document text extraction error.
    #[error("text extraction error: {0}")]
    Text(#[from] TextError),

    /// Workflow error (approvals, materialization, receipts).
    #[error("workflow error: {0}")]
    Workflow(#[from] WorkflowError),

    /// Storage error.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Assisted-extraction backend error.
    #[error("assist error: {0}")]
    Assist(#[from] procure_assist::AssistError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to raw text extraction from document files.
///
/// These never escape the text adapter boundary: [`crate::text::extract_text`]
/// catches them, logs, and degrades to empty text.
#[derive(Error, Debug)]
pub enum TextError {
    /// Failed to read the file.
    #[error("failed to read file: {0}")]
    Read(String),

    /// Failed to parse the document container or content.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// The document is encrypted and cannot be processed.
    #[error("document is encrypted")]
    Encrypted,

    /// The document is empty or has no pages.
    #[error("document has no pages")]
    NoPages,
}

/// Errors raised by the persistence boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No purchase request with the given id.
    #[error("purchase request {0} not found")]
    RequestNotFound(u64),

    /// No purchase order exists for the given request.
    #[error("no purchase order for request {0}")]
    OrderNotFound(u64),

    /// A decision already occupies this (request, level) slot.
    #[error("level {level} decision already recorded for request {request_id}")]
    DuplicateApproval { request_id: u64, level: u8 },

    /// A purchase order already exists for this request.
    #[error("purchase order already exists for request {0}")]
    OrderExists(u64),
}

/// Errors raised by workflow operations.
///
/// Workflow failures are never absorbed: callers get a classified error so
/// they can decide retry vs. abort.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// The purchase request does not exist.
    #[error("purchase request {0} not found")]
    RequestNotFound(u64),

    /// No purchase order is on file for the request.
    #[error("no purchase order found for request {0}")]
    OrderNotFound(u64),

    /// The request has already been approved or rejected.
    #[error("purchase request {0} has already been processed")]
    RequestClosed(u64),

    /// A decision at this level has already been recorded.
    #[error("level {level} decision already recorded for request {request_id}")]
    AlreadyDecided { request_id: u64, level: u8 },

    /// The request is not approved (receipt submission requires approval).
    #[error("purchase request {0} is not approved")]
    RequestNotApproved(u64),

    /// The receipt document yielded no usable structured data.
    #[error("receipt extraction failed: {0}")]
    ReceiptUnreadable(String),

    /// An unexpected storage failure.
    #[error("store error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for WorkflowError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::RequestNotFound(id) => WorkflowError::RequestNotFound(id),
            StoreError::OrderNotFound(id) => WorkflowError::OrderNotFound(id),
            StoreError::DuplicateApproval { request_id, level } => {
                WorkflowError::AlreadyDecided { request_id, level }
            }
            other => WorkflowError::Store(other),
        }
    }
}

/// Result type for the procure library.
pub type Result<T> = std::result::Result<T, ProcureError>;
