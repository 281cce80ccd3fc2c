//! Purchase order models and the structured data snapshot.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::request::{Approval, ApprovalLevel, PurchaseRequest, Requester, Urgency};

/// A materialized purchase order, one-to-one with an approved request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: u64,
    pub request_id: u64,

    /// Globally unique, date-scoped sequential identifier
    /// (`PO-YYYYMMDD-NNNN`).
    pub po_number: String,

    pub issue_date: NaiveDate,

    pub vendor_name: String,
    pub vendor_contact: String,
    pub vendor_address: String,
    pub total_amount: Decimal,

    /// Full structured field map, stored independently of any rendered
    /// document artifact.
    pub snapshot: OrderSnapshot,

    pub created_at: DateTime<Utc>,
}

/// One approval decision as recorded in the order snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalEntry {
    pub level: ApprovalLevel,
    pub approver_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approver_role: Option<String>,
    pub approved: bool,
    pub comments: String,
    pub timestamp: DateTime<Utc>,
}

impl ApprovalEntry {
    fn from_approval(approval: &Approval) -> Self {
        Self {
            level: approval.level,
            approver_name: approval.approver.name.clone(),
            approver_role: approval.approver.role.clone(),
            approved: approval.approved,
            comments: approval.comments.clone(),
            timestamp: approval.created_at,
        }
    }
}

/// Standard terms attached to every generated order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderTerms {
    pub payment_terms: String,
    pub delivery_terms: String,
    pub quality_terms: String,
    pub return_policy: String,
    pub warranty: String,
}

impl Default for OrderTerms {
    fn default() -> Self {
        Self {
            payment_terms: "Net 30 days".to_string(),
            delivery_terms: "As per agreed timeline".to_string(),
            quality_terms: "Goods must meet specified standards".to_string(),
            return_policy: "Defective items may be returned within 30 days".to_string(),
            warranty: "Standard manufacturer warranty applies".to_string(),
        }
    }
}

/// Complete purchase-order data snapshot: request fields, vendor info,
/// approval history, and terms, frozen at materialization time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub title: String,
    pub description: String,
    pub amount: Decimal,
    pub urgency: Urgency,

    pub vendor_name: String,
    pub vendor_contact: String,
    pub vendor_address: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub requested_delivery_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost_center: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gl_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_justification: Option<String>,

    pub created_by: Requester,

    /// Approval history, ordered by level.
    pub approvals: Vec<ApprovalEntry>,

    pub terms: OrderTerms,

    pub request_created_at: DateTime<Utc>,
    pub generated_at: DateTime<Utc>,
}

impl OrderSnapshot {
    /// Freeze a request and its approval history into an order snapshot.
    ///
    /// Vendor fields fall back to placeholder labels when the request
    /// carries none, so a generated order always has displayable vendor
    /// lines.
    pub fn build(
        request: &PurchaseRequest,
        approvals: &[Approval],
        generated_at: DateTime<Utc>,
    ) -> Self {
        let mut entries: Vec<ApprovalEntry> =
            approvals.iter().map(ApprovalEntry::from_approval).collect();
        entries.sort_by_key(|e| e.level.number());

        Self {
            title: request.title.clone(),
            description: request.description.clone(),
            amount: request.amount,
            urgency: request.urgency,
            vendor_name: request
                .vendor_name
                .clone()
                .unwrap_or_else(|| "Vendor Name".to_string()),
            vendor_contact: request
                .vendor_contact
                .clone()
                .unwrap_or_else(|| "Contact Information".to_string()),
            vendor_address: request
                .vendor_address
                .clone()
                .unwrap_or_else(|| "Vendor Address".to_string()),
            requested_delivery_date: request.requested_delivery_date,
            cost_center: request.cost_center.clone(),
            gl_account: request.gl_account.clone(),
            budget_code: request.budget_code.clone(),
            project_code: request.project_code.clone(),
            business_justification: request.business_justification.clone(),
            created_by: request.created_by.clone(),
            approvals: entries,
            terms: OrderTerms::default(),
            request_created_at: request.created_at,
            generated_at,
        }
    }
}
