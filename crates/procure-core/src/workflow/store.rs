//! Persistence boundary for requests, approvals and orders.
//!
//! The trait is the seam: workflow logic talks to [`ProcurementStore`]
//! and never to a concrete backing. [`MemoryStore`] is the in-process
//! implementation; its single mutex makes every operation atomic,
//! including the uniqueness checks that back the workflow invariants.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{NaiveDate, Utc};

use crate::error::StoreError;
use crate::models::{
    Approval, Decision, NewRequest, PurchaseOrder, PurchaseRequest, RequestStatus,
};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Storage operations required by the procurement workflow.
pub trait ProcurementStore: Send + Sync {
    fn create_request(&self, new: NewRequest) -> StoreResult<PurchaseRequest>;
    fn request(&self, id: u64) -> StoreResult<PurchaseRequest>;
    fn requests(&self) -> StoreResult<Vec<PurchaseRequest>>;
    fn set_status(&self, id: u64, status: RequestStatus) -> StoreResult<()>;
    fn attach_receipt(&self, id: u64, path: PathBuf) -> StoreResult<()>;

    /// Record a decision. Fails with [`StoreError::DuplicateApproval`] if
    /// the (request, level) slot is already occupied.
    fn insert_approval(&self, request_id: u64, decision: &Decision) -> StoreResult<Approval>;
    fn approvals(&self, request_id: u64) -> StoreResult<Vec<Approval>>;

    fn order_for_request(&self, request_id: u64) -> StoreResult<Option<PurchaseOrder>>;

    /// Persist an order, assigning its id and a date-scoped `po_number`
    /// derived from `issue_date` in the same atomic step (any incoming
    /// `po_number` is ignored). Fails with [`StoreError::OrderExists`] if
    /// the request already has one; at most one order per request.
    fn insert_order(&self, order: PurchaseOrder) -> StoreResult<PurchaseOrder>;

    /// Preview the next purchase order number for the given issue date.
    /// Numbers are `PO-YYYYMMDD-NNNN`, sequential within a date.
    fn next_po_number(&self, issue_date: NaiveDate) -> StoreResult<String>;
}

#[derive(Default)]
struct Inner {
    requests: HashMap<u64, PurchaseRequest>,
    approvals: HashMap<u64, Vec<Approval>>,
    orders: HashMap<u64, PurchaseOrder>,
    next_request_id: u64,
    next_approval_id: u64,
    next_order_id: u64,
}

/// In-memory implementation of [`ProcurementStore`].
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Lock poisoning only happens if a holder panicked; propagate the
        // inner state anyway since all mutations here are single-step.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcurementStore for MemoryStore {
    fn create_request(&self, new: NewRequest) -> StoreResult<PurchaseRequest> {
        let mut inner = self.lock();
        inner.next_request_id += 1;
        let request = PurchaseRequest {
            id: inner.next_request_id,
            title: new.title,
            description: new.description,
            amount: new.amount,
            status: RequestStatus::Pending,
            urgency: new.urgency,
            vendor_name: new.vendor_name,
            vendor_contact: new.vendor_contact,
            vendor_address: new.vendor_address,
            requested_delivery_date: new.requested_delivery_date,
            cost_center: new.cost_center,
            gl_account: new.gl_account,
            budget_code: new.budget_code,
            project_code: new.project_code,
            business_justification: new.business_justification,
            created_by: new.created_by,
            proforma: new.proforma,
            receipt: None,
            created_at: Utc::now(),
        };
        inner.requests.insert(request.id, request.clone());
        Ok(request)
    }

    fn request(&self, id: u64) -> StoreResult<PurchaseRequest> {
        self.lock()
            .requests
            .get(&id)
            .cloned()
            .ok_or(StoreError::RequestNotFound(id))
    }

    fn requests(&self) -> StoreResult<Vec<PurchaseRequest>> {
        let inner = self.lock();
        let mut all: Vec<_> = inner.requests.values().cloned().collect();
        all.sort_by_key(|r| r.id);
        Ok(all)
    }

    fn set_status(&self, id: u64, status: RequestStatus) -> StoreResult<()> {
        let mut inner = self.lock();
        let request = inner
            .requests
            .get_mut(&id)
            .ok_or(StoreError::RequestNotFound(id))?;
        request.status = status;
        Ok(())
    }

    fn attach_receipt(&self, id: u64, path: PathBuf) -> StoreResult<()> {
        let mut inner = self.lock();
        let request = inner
            .requests
            .get_mut(&id)
            .ok_or(StoreError::RequestNotFound(id))?;
        request.receipt = Some(path);
        Ok(())
    }

    fn insert_approval(&self, request_id: u64, decision: &Decision) -> StoreResult<Approval> {
        let mut inner = self.lock();
        if !inner.requests.contains_key(&request_id) {
            return Err(StoreError::RequestNotFound(request_id));
        }
        let existing = inner.approvals.entry(request_id).or_default();
        if existing.iter().any(|a| a.level == decision.level) {
            return Err(StoreError::DuplicateApproval {
                request_id,
                level: decision.level.number(),
            });
        }

        inner.next_approval_id += 1;
        let approval = Approval {
            id: inner.next_approval_id,
            request_id,
            level: decision.level,
            approved: decision.approved,
            comments: decision.comments.clone(),
            approver: decision.approver.clone(),
            created_at: Utc::now(),
        };
        inner
            .approvals
            .entry(request_id)
            .or_default()
            .push(approval.clone());
        Ok(approval)
    }

    fn approvals(&self, request_id: u64) -> StoreResult<Vec<Approval>> {
        Ok(self
            .lock()
            .approvals
            .get(&request_id)
            .cloned()
            .unwrap_or_default())
    }

    fn order_for_request(&self, request_id: u64) -> StoreResult<Option<PurchaseOrder>> {
        Ok(self.lock().orders.get(&request_id).cloned())
    }

    fn insert_order(&self, mut order: PurchaseOrder) -> StoreResult<PurchaseOrder> {
        let mut inner = self.lock();
        if inner.orders.contains_key(&order.request_id) {
            return Err(StoreError::OrderExists(order.request_id));
        }
        inner.next_order_id += 1;
        order.id = inner.next_order_id;
        // Numbering and insertion share the lock so concurrent
        // materializations of different requests never collide.
        order.po_number = super::sequence::next_in_sequence(
            inner.orders.values().map(|o| o.po_number.as_str()),
            order.issue_date,
        );
        inner.orders.insert(order.request_id, order.clone());
        Ok(order)
    }

    fn next_po_number(&self, issue_date: NaiveDate) -> StoreResult<String> {
        let inner = self.lock();
        let next = super::sequence::next_in_sequence(
            inner.orders.values().map(|o| o.po_number.as_str()),
            issue_date,
        );
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApprovalLevel, NewRequest, OrderSnapshot, Requester};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn new_request(title: &str) -> NewRequest {
        NewRequest {
            title: title.to_string(),
            amount: Decimal::new(50000, 2),
            ..NewRequest::default()
        }
    }

    fn decision(level: ApprovalLevel, approved: bool, who: &str) -> Decision {
        if approved {
            Decision::approve(level, Requester::named(who))
        } else {
            Decision::reject(level, Requester::named(who))
        }
    }

    fn sample_order(store: &MemoryStore, request_id: u64, po_number: &str) -> PurchaseOrder {
        let request = store.request(request_id).unwrap();
        let now = Utc::now();
        PurchaseOrder {
            id: 0,
            request_id,
            po_number: po_number.to_string(),
            issue_date: NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            vendor_name: "Acme Corp".to_string(),
            vendor_contact: "sales@acme.example".to_string(),
            vendor_address: "1 Acme Way".to_string(),
            total_amount: request.amount,
            snapshot: OrderSnapshot::build(&request, &[], now),
            created_at: now,
        }
    }

    #[test]
    fn test_create_assigns_sequential_ids() {
        let store = MemoryStore::new();
        let a = store.create_request(new_request("Laptops")).unwrap();
        let b = store.create_request(new_request("Chairs")).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(a.status, RequestStatus::Pending);
    }

    #[test]
    fn test_request_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(
            store.request(42),
            Err(StoreError::RequestNotFound(42))
        ));
    }

    #[test]
    fn test_duplicate_level_rejected() {
        let store = MemoryStore::new();
        let request = store.create_request(new_request("Laptops")).unwrap();

        store
            .insert_approval(request.id, &decision(ApprovalLevel::First, true, "ana"))
            .unwrap();
        let err = store
            .insert_approval(request.id, &decision(ApprovalLevel::First, false, "bo"))
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::DuplicateApproval { level: 1, .. }
        ));
        assert_eq!(store.approvals(request.id).unwrap().len(), 1);
    }

    #[test]
    fn test_distinct_levels_coexist() {
        let store = MemoryStore::new();
        let request = store.create_request(new_request("Laptops")).unwrap();

        store
            .insert_approval(request.id, &decision(ApprovalLevel::First, true, "ana"))
            .unwrap();
        store
            .insert_approval(request.id, &decision(ApprovalLevel::Second, true, "bo"))
            .unwrap();

        assert_eq!(store.approvals(request.id).unwrap().len(), 2);
    }

    #[test]
    fn test_one_order_per_request() {
        let store = MemoryStore::new();
        let request = store.create_request(new_request("Laptops")).unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();

        let order = sample_order(&store, request.id, "");
        let stored = store.insert_order(order.clone()).unwrap();
        assert_eq!(stored.po_number, "PO-20250115-0001");

        let err = store.insert_order(order).unwrap_err();
        assert!(matches!(err, StoreError::OrderExists(_)));

        // Sequence advances past the stored number
        assert_eq!(store.next_po_number(date).unwrap(), "PO-20250115-0002");
    }

    #[test]
    fn test_po_numbers_scoped_by_date() {
        let store = MemoryStore::new();
        let jan = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let feb = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();

        assert_eq!(store.next_po_number(jan).unwrap(), "PO-20250115-0001");
        assert_eq!(store.next_po_number(feb).unwrap(), "PO-20250201-0001");
    }
}
