//! Purchase request and approval data models.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a purchase request.
///
/// Transitions are one-way: `Pending -> Approved` or `Pending -> Rejected`.
/// Both outcomes are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Awaiting approval decisions.
    #[default]
    Pending,
    /// Both approval levels approved.
    Approved,
    /// Rejected at either level.
    Rejected,
}

impl RequestStatus {
    /// Whether the status admits no further transitions.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }

    /// Lowercase identifier, as stored and serialized.
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }
}

/// Urgency tier of a purchase request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    #[default]
    Normal,
    High,
    Critical,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Normal => "normal",
            Urgency::High => "high",
            Urgency::Critical => "critical",
        }
    }
}

/// Approval tier. Exactly two levels exist; both must approve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ApprovalLevel {
    First,
    Second,
}

impl ApprovalLevel {
    /// All levels, in order.
    pub const ALL: [ApprovalLevel; 2] = [ApprovalLevel::First, ApprovalLevel::Second];

    /// Numeric level (1 or 2).
    pub fn number(&self) -> u8 {
        match self {
            ApprovalLevel::First => 1,
            ApprovalLevel::Second => 2,
        }
    }
}

impl From<ApprovalLevel> for u8 {
    fn from(level: ApprovalLevel) -> u8 {
        level.number()
    }
}

impl TryFrom<u8> for ApprovalLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(ApprovalLevel::First),
            2 => Ok(ApprovalLevel::Second),
            other => Err(format!("invalid approval level: {}", other)),
        }
    }
}

/// Identity of a requester or approver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Requester {
    /// Display name.
    pub name: String,

    /// Email address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Role label (e.g. "Approver Level 1").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Department.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,

    /// Employee identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

impl Requester {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// A purchase request with vendor, budget, and attachment data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseRequest {
    /// Store-assigned identifier.
    pub id: u64,

    pub title: String,
    pub description: String,

    /// Requested amount.
    pub amount: Decimal,

    pub status: RequestStatus,
    pub urgency: Urgency,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor_address: Option<String>,

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

    /// Attached proforma document, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proforma: Option<PathBuf>,

    /// Attached receipt document, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<PathBuf>,

    pub created_at: DateTime<Utc>,
}

/// Input for creating a purchase request. The store assigns id, status,
/// and timestamps.
#[derive(Debug, Clone, Default)]
pub struct NewRequest {
    pub title: String,
    pub description: String,
    pub amount: Decimal,
    pub urgency: Urgency,
    pub vendor_name: Option<String>,
    pub vendor_contact: Option<String>,
    pub vendor_address: Option<String>,
    pub requested_delivery_date: Option<NaiveDate>,
    pub cost_center: Option<String>,
    pub gl_account: Option<String>,
    pub budget_code: Option<String>,
    pub project_code: Option<String>,
    pub business_justification: Option<String>,
    pub created_by: Requester,
    pub proforma: Option<PathBuf>,
}

/// A recorded approval decision. At most one exists per (request, level).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Approval {
    pub id: u64,
    pub request_id: u64,
    pub level: ApprovalLevel,
    pub approved: bool,
    pub comments: String,
    pub approver: Requester,
    pub created_at: DateTime<Utc>,
}

/// An approval decision submitted by an approver.
#[derive(Debug, Clone)]
pub struct Decision {
    pub level: ApprovalLevel,
    pub approved: bool,
    pub comments: String,
    pub approver: Requester,
}

impl Decision {
    pub fn approve(level: ApprovalLevel, approver: Requester) -> Self {
        Self {
            level,
            approved: true,
            comments: String::new(),
            approver,
        }
    }

    pub fn reject(level: ApprovalLevel, approver: Requester) -> Self {
        Self {
            level,
            approved: false,
            comments: String::new(),
            approver,
        }
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }
}
