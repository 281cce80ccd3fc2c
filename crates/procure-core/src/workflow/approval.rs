//! Two-level approval workflow and purchase order materialization.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::{info, warn};

use crate::error::WorkflowError;
use crate::models::{
    Approval, ApprovalLevel, Decision, OrderSnapshot, PurchaseOrder, PurchaseRequest,
    RequestStatus,
};
use crate::reconcile::ReconciliationReport;
use crate::workflow::store::ProcurementStore;

/// Outcome of recording one approval decision.
#[derive(Debug)]
pub struct DecisionOutcome {
    pub approval: Approval,
    /// Status after this decision was applied.
    pub status: RequestStatus,
    /// The order, when this decision completed the quorum.
    pub order: Option<PurchaseOrder>,
}

/// Outcome of submitting a receipt for an approved request.
#[derive(Debug)]
pub struct ReceiptSubmission {
    pub request: PurchaseRequest,
    /// Reconciliation result; `None` with `warning` set when the receipt
    /// could not be validated. Intake still succeeds either way.
    pub report: Option<ReconciliationReport>,
    pub warning: Option<String>,
}

/// Drives request decisions through the two-level quorum.
///
/// Decisions on the same request are serialized through a per-request
/// lock so the decide-check-materialize step runs at most once even
/// under concurrent approvers.
pub struct ApprovalWorkflow<S> {
    store: Arc<S>,
    request_locks: Mutex<HashMap<u64, Arc<Mutex<()>>>>,
}

impl<S: ProcurementStore> ApprovalWorkflow<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            request_locks: Mutex::new(HashMap::new()),
        }
    }

    fn request_lock(&self, request_id: u64) -> Arc<Mutex<()>> {
        let mut locks = match self.request_locks.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        locks.entry(request_id).or_default().clone()
    }

    /// Record an approval decision and apply its consequences.
    ///
    /// A rejection at either level closes the request immediately. An
    /// approval closes it only once every level has approved, at which
    /// point the purchase order is materialized. Decisions against a
    /// closed request fail with [`WorkflowError::RequestClosed`].
    pub fn record_decision(
        &self,
        request_id: u64,
        decision: Decision,
    ) -> Result<DecisionOutcome, WorkflowError> {
        let lock = self.request_lock(request_id);
        let _guard = match lock.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let request = self.store.request(request_id)?;
        if request.status.is_terminal() {
            return Err(WorkflowError::RequestClosed(request_id));
        }

        let approval = self.store.insert_approval(request_id, &decision)?;
        info!(
            "Request {}: level {} {} by {}",
            request_id,
            decision.level.number(),
            if decision.approved { "approved" } else { "rejected" },
            decision.approver.name
        );

        if !decision.approved {
            self.store.set_status(request_id, RequestStatus::Rejected)?;
            return Ok(DecisionOutcome {
                approval,
                status: RequestStatus::Rejected,
                order: None,
            });
        }

        let approvals = self.store.approvals(request_id)?;
        let quorum = ApprovalLevel::ALL
            .iter()
            .all(|level| approvals.iter().any(|a| a.level == *level && a.approved));
        if !quorum {
            return Ok(DecisionOutcome {
                approval,
                status: RequestStatus::Pending,
                order: None,
            });
        }

        self.store.set_status(request_id, RequestStatus::Approved)?;
        let order = self.materialize(request_id, &approvals)?;
        Ok(DecisionOutcome {
            approval,
            status: RequestStatus::Approved,
            order: Some(order),
        })
    }

    /// Materialize the purchase order for a fully approved request.
    /// Returns the existing order if one is already on file.
    fn materialize(
        &self,
        request_id: u64,
        approvals: &[Approval],
    ) -> Result<PurchaseOrder, WorkflowError> {
        if let Some(existing) = self.store.order_for_request(request_id)? {
            return Ok(existing);
        }

        let request = self.store.request(request_id)?;
        let now = Utc::now();
        let issue_date = now.date_naive();
        let snapshot = OrderSnapshot::build(&request, approvals, now);

        // The store assigns id and po_number on insert.
        let order = self.store.insert_order(PurchaseOrder {
            id: 0,
            request_id,
            po_number: String::new(),
            issue_date,
            vendor_name: snapshot.vendor_name.clone(),
            vendor_contact: snapshot.vendor_contact.clone(),
            vendor_address: snapshot.vendor_address.clone(),
            total_amount: request.amount,
            snapshot,
            created_at: now,
        })?;

        info!(
            "Materialized order {} for request {}",
            order.po_number, request_id
        );
        Ok(order)
    }

    /// Attach a receipt document to an approved request and validate it
    /// against the purchase order.
    ///
    /// Intake is decoupled from validation: the receipt is recorded even
    /// when reconciliation cannot run, with the failure reported as a
    /// warning rather than an error.
    pub fn submit_receipt(
        &self,
        request_id: u64,
        path: PathBuf,
        validate: impl FnOnce(u64, &std::path::Path) -> Result<ReconciliationReport, WorkflowError>,
    ) -> Result<ReceiptSubmission, WorkflowError> {
        let request = self.store.request(request_id)?;
        if request.status != RequestStatus::Approved {
            return Err(WorkflowError::RequestNotApproved(request_id));
        }

        self.store.attach_receipt(request_id, path.clone())?;

        let (report, warning) = match validate(request_id, &path) {
            Ok(report) => (Some(report), None),
            Err(e) => {
                warn!("Receipt validation failed for request {}: {}", request_id, e);
                (None, Some(e.to_string()))
            }
        };

        let request = self.store.request(request_id)?;
        Ok(ReceiptSubmission {
            request,
            report,
            warning,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewRequest, Requester};
    use crate::workflow::store::MemoryStore;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::thread;

    fn workflow() -> (Arc<MemoryStore>, ApprovalWorkflow<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), ApprovalWorkflow::new(store))
    }

    fn pending_request(store: &MemoryStore) -> u64 {
        store
            .create_request(NewRequest {
                title: "Laptops".to_string(),
                amount: Decimal::new(250000, 2),
                vendor_name: Some("Acme Corp".to_string()),
                ..NewRequest::default()
            })
            .unwrap()
            .id
    }

    fn approve(level: ApprovalLevel) -> Decision {
        Decision::approve(level, Requester::named("ana"))
    }

    #[test]
    fn test_single_approval_keeps_request_pending() {
        let (store, workflow) = workflow();
        let id = pending_request(&store);

        let outcome = workflow.record_decision(id, approve(ApprovalLevel::First)).unwrap();

        assert_eq!(outcome.status, RequestStatus::Pending);
        assert!(outcome.order.is_none());
        assert_eq!(store.request(id).unwrap().status, RequestStatus::Pending);
    }

    #[test]
    fn test_full_quorum_approves_and_materializes() {
        let (store, workflow) = workflow();
        let id = pending_request(&store);

        workflow.record_decision(id, approve(ApprovalLevel::First)).unwrap();
        let outcome = workflow.record_decision(id, approve(ApprovalLevel::Second)).unwrap();

        assert_eq!(outcome.status, RequestStatus::Approved);
        let order = outcome.order.unwrap();
        assert_eq!(order.request_id, id);
        assert_eq!(order.vendor_name, "Acme Corp");
        assert_eq!(order.total_amount, Decimal::new(250000, 2));
        assert!(order.po_number.starts_with("PO-"));
        assert_eq!(order.snapshot.approvals.len(), 2);
        assert!(store.order_for_request(id).unwrap().is_some());
    }

    #[test]
    fn test_rejection_at_either_level_is_terminal() {
        let (store, workflow) = workflow();
        let id = pending_request(&store);

        workflow.record_decision(id, approve(ApprovalLevel::First)).unwrap();
        let outcome = workflow
            .record_decision(id, Decision::reject(ApprovalLevel::Second, Requester::named("bo")))
            .unwrap();

        assert_eq!(outcome.status, RequestStatus::Rejected);
        assert!(outcome.order.is_none());
        assert!(store.order_for_request(id).unwrap().is_none());
    }

    #[test]
    fn test_no_decisions_after_close() {
        let (store, workflow) = workflow();
        let id = pending_request(&store);

        workflow
            .record_decision(id, Decision::reject(ApprovalLevel::First, Requester::named("ana")))
            .unwrap();

        let err = workflow.record_decision(id, approve(ApprovalLevel::Second)).unwrap_err();
        assert!(matches!(err, WorkflowError::RequestClosed(_)));
    }

    #[test]
    fn test_duplicate_level_decision_fails() {
        let (store, workflow) = workflow();
        let id = pending_request(&store);

        workflow.record_decision(id, approve(ApprovalLevel::First)).unwrap();
        let err = workflow.record_decision(id, approve(ApprovalLevel::First)).unwrap_err();

        assert!(matches!(err, WorkflowError::AlreadyDecided { level: 1, .. }));
    }

    #[test]
    fn test_unknown_request() {
        let (_store, workflow) = workflow();
        let err = workflow.record_decision(99, approve(ApprovalLevel::First)).unwrap_err();
        assert!(matches!(err, WorkflowError::RequestNotFound(99)));
    }

    #[test]
    fn test_concurrent_decisions_materialize_once() {
        let (store, workflow) = workflow();
        let workflow = Arc::new(workflow);

        // Many requests decided from two racing approver threads each;
        // every request must end with exactly one order and a unique
        // po_number.
        let ids: Vec<u64> = (0..16).map(|_| pending_request(&store)).collect();

        let mut handles = Vec::new();
        for &id in &ids {
            for level in ApprovalLevel::ALL {
                let workflow = workflow.clone();
                handles.push(thread::spawn(move || {
                    workflow
                        .record_decision(id, Decision::approve(level, Requester::named("ana")))
                        .unwrap();
                }));
            }
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let mut po_numbers = Vec::new();
        for &id in &ids {
            let order = store.order_for_request(id).unwrap().unwrap();
            po_numbers.push(order.po_number);
        }
        po_numbers.sort();
        po_numbers.dedup();
        assert_eq!(po_numbers.len(), ids.len());
    }

    #[test]
    fn test_receipt_requires_approved_request() {
        let (store, workflow) = workflow();
        let id = pending_request(&store);

        let err = workflow
            .submit_receipt(id, PathBuf::from("receipt.pdf"), |_, _| {
                panic!("validator must not run")
            })
            .unwrap_err();
        assert!(matches!(err, WorkflowError::RequestNotApproved(_)));
    }

    #[test]
    fn test_receipt_intake_survives_validation_failure() {
        let (store, workflow) = workflow();
        let id = pending_request(&store);
        workflow.record_decision(id, approve(ApprovalLevel::First)).unwrap();
        workflow.record_decision(id, approve(ApprovalLevel::Second)).unwrap();

        let submission = workflow
            .submit_receipt(id, PathBuf::from("receipt.pdf"), |_, _| {
                Err(WorkflowError::ReceiptUnreadable(
                    "Could not extract text from document".to_string(),
                ))
            })
            .unwrap();

        assert!(submission.report.is_none());
        assert!(submission.warning.is_some());
        assert_eq!(
            submission.request.receipt,
            Some(PathBuf::from("receipt.pdf"))
        );
    }
}
