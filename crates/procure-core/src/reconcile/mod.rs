//! Purchase-order vs receipt reconciliation.
//!
//! Compares a materialized purchase order against fields extracted from a
//! delivery receipt and produces a graded discrepancy report. Only high
//! severity findings invalidate the receipt; medium findings are advisory.

use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::WorkflowError;
use crate::extract::DocumentProcessor;
use crate::models::{DocumentKind, ExtractedFields, ExtractedItem, PurchaseOrder};
use crate::workflow::store::ProcurementStore;

/// Discrepancy grading. `High` findings invalidate the receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Medium,
    High,
}

/// A single field-level mismatch between order and receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discrepancy {
    pub field: String,
    pub po_value: String,
    pub receipt_value: String,
    pub severity: Severity,
    pub message: String,
}

/// Order side of the report summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoSummary {
    pub po_number: String,
    pub vendor_name: String,
    pub total_amount: Decimal,
}

/// Receipt side of the report summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<Decimal>,
    pub items_count: usize,
}

/// Outcome of reconciling one receipt against one purchase order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub valid: bool,
    pub discrepancies: Vec<Discrepancy>,
    pub po_summary: PoSummary,
    pub receipt_summary: ReceiptSummary,
}

/// The comparable slice of a purchase order.
///
/// `has_detailed_items` stays false for orders materialized from a
/// request, because the order records a single total rather than line
/// items; the item-count comparison only runs when line detail exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoSnapshot {
    pub po_number: String,
    pub vendor_name: String,
    pub total_amount: Decimal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<ExtractedItem>,
    #[serde(default)]
    pub has_detailed_items: bool,
}

impl PoSnapshot {
    pub fn from_order(order: &PurchaseOrder) -> Self {
        Self {
            po_number: order.po_number.clone(),
            vendor_name: order.vendor_name.clone(),
            total_amount: order.total_amount,
            items: Vec::new(),
            has_detailed_items: false,
        }
    }
}

/// Relative amount difference above this fraction is flagged.
const AMOUNT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 1); // 0.1
/// Relative amount difference above this fraction is graded high.
const AMOUNT_HIGH_THRESHOLD: Decimal = Decimal::from_parts(2, 0, 0, false, 1); // 0.2

/// Compare a purchase order snapshot against extracted receipt fields.
pub fn reconcile(po: &PoSnapshot, receipt: &ExtractedFields) -> ReconciliationReport {
    let mut discrepancies = Vec::new();

    if let Some(receipt_vendor) = &receipt.vendor_name {
        if !receipt_vendor.eq_ignore_ascii_case(&po.vendor_name) {
            discrepancies.push(Discrepancy {
                field: "vendor_name".to_string(),
                po_value: po.vendor_name.clone(),
                receipt_value: receipt_vendor.clone(),
                severity: Severity::High,
                message: format!(
                    "Vendor mismatch: PO has '{}', receipt has '{}'",
                    po.vendor_name, receipt_vendor
                ),
            });
        }
    }

    if let Some(receipt_total) = receipt.total_amount {
        let diff = (po.total_amount - receipt_total).abs();
        let tolerance = po.total_amount.abs() * AMOUNT_TOLERANCE;
        if diff > tolerance {
            let severity = if diff > po.total_amount.abs() * AMOUNT_HIGH_THRESHOLD {
                Severity::High
            } else {
                Severity::Medium
            };
            discrepancies.push(Discrepancy {
                field: "total_amount".to_string(),
                po_value: po.total_amount.to_string(),
                receipt_value: receipt_total.to_string(),
                severity,
                message: format!(
                    "Amount difference: ${} (PO: ${}, receipt: ${})",
                    diff, po.total_amount, receipt_total
                ),
            });
        }
    }

    if po.has_detailed_items
        && !po.items.is_empty()
        && !receipt.items.is_empty()
        && po.items.len() != receipt.items.len()
    {
        discrepancies.push(Discrepancy {
            field: "items".to_string(),
            po_value: po.items.len().to_string(),
            receipt_value: receipt.items.len().to_string(),
            severity: Severity::Medium,
            message: format!(
                "Item count differs: PO has {}, receipt has {}",
                po.items.len(),
                receipt.items.len()
            ),
        });
    }

    let valid = !discrepancies
        .iter()
        .any(|d| d.severity == Severity::High);

    debug!(
        "Reconciled PO {}: {} discrepancies, valid={}",
        po.po_number,
        discrepancies.len(),
        valid
    );

    ReconciliationReport {
        valid,
        discrepancies,
        po_summary: PoSummary {
            po_number: po.po_number.clone(),
            vendor_name: po.vendor_name.clone(),
            total_amount: po.total_amount,
        },
        receipt_summary: ReceiptSummary {
            vendor_name: receipt.vendor_name.clone(),
            total_amount: receipt.total_amount,
            items_count: receipt.items.len(),
        },
    }
}

/// Validates an uploaded receipt file against a request's purchase order.
pub struct ReceiptValidator<S> {
    store: Arc<S>,
    processor: DocumentProcessor,
}

impl<S: ProcurementStore> ReceiptValidator<S> {
    pub fn new(store: Arc<S>, processor: DocumentProcessor) -> Self {
        Self { store, processor }
    }

    /// Extract fields from the receipt file and reconcile against the
    /// order materialized for the request.
    pub fn validate(
        &self,
        request_id: u64,
        receipt_path: &Path,
    ) -> Result<ReconciliationReport, WorkflowError> {
        self.store.request(request_id)?;
        let order = self
            .store
            .order_for_request(request_id)?
            .ok_or(WorkflowError::OrderNotFound(request_id))?;

        let fields = self.processor.process(receipt_path, DocumentKind::Receipt);
        if fields.has_error() {
            return Err(WorkflowError::ReceiptUnreadable(
                fields.error.unwrap_or_default(),
            ));
        }

        let report = reconcile(&PoSnapshot::from_order(&order), &fields);
        info!(
            "Receipt validation for request {}: valid={}",
            request_id, report.valid
        );
        Ok(report)
    }
}
