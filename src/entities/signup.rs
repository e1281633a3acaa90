use serde::{Deserialize, Serialize};

use super::{Fields, SignupPatch};
use crate::error::Error;

pub const EMAIL: &str = "email";
pub const STATUS: &str = "status";
pub const PLAN_TYPE: &str = "planType";
pub const WHY_JOIN_REASON: &str = "whyJoinReason";

/// An applicant or member, keyed by `email`.
///
/// Columns other than the four known ones are kept in `fields` and written
/// back untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRecord {
    pub email: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub plan_type: PlanType,
    #[serde(default)]
    pub why_join_reason: String,
    #[serde(flatten)]
    pub fields: Fields,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl Status {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Unknown or empty cells count as `pending`.
    pub fn from_cell(cell: &str) -> Self {
        match cell.trim().to_ascii_lowercase().as_str() {
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Pending,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    #[default]
    Free,
    Elite,
    Pro,
}

impl PlanType {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Elite => "elite",
            Self::Pro => "pro",
        }
    }

    pub fn from_cell(cell: &str) -> Self {
        match cell.trim().to_ascii_lowercase().as_str() {
            "elite" => Self::Elite,
            "pro" => Self::Pro,
            _ => Self::Free,
        }
    }

    pub fn is_premium(&self) -> bool {
        matches!(self, Self::Elite | Self::Pro)
    }
}

impl SignupRecord {
    /// Builds a record from a table row. Rows without an email are not
    /// records.
    pub fn from_fields(mut fields: Fields) -> Option<Self> {
        let email = fields.remove(EMAIL).filter(|email| !email.is_empty())?;

        let status = fields
            .remove(STATUS)
            .map(|cell| Status::from_cell(&cell))
            .unwrap_or_default();
        let plan_type = fields
            .remove(PLAN_TYPE)
            .map(|cell| PlanType::from_cell(&cell))
            .unwrap_or_default();
        let why_join_reason = fields.remove(WHY_JOIN_REASON).unwrap_or_default();

        Some(Self {
            email,
            status,
            plan_type,
            why_join_reason,
            fields,
        })
    }

    pub fn to_fields(&self) -> Fields {
        let mut fields = self.fields.clone();
        fields.insert(EMAIL.into(), self.email.clone());
        fields.insert(STATUS.into(), self.status.name().into());
        fields.insert(PLAN_TYPE.into(), self.plan_type.name().into());
        fields.insert(WHY_JOIN_REASON.into(), self.why_join_reason.clone());
        fields
    }

    /// Returns a copy of the record with `patch` merged over it.
    pub fn apply(&self, patch: &SignupPatch) -> Result<Self, Error> {
        let mut fields = self.to_fields();
        patch.merge_into(&mut fields)?;

        Self::from_fields(fields).ok_or_else(Error::unexpected_error)
    }

    pub fn is_approved_free_member(&self) -> bool {
        self.plan_type == PlanType::Free && self.status == Status::Approved
    }

    pub fn is_premium_member(&self) -> bool {
        self.plan_type.is_premium()
    }

    pub fn is_rejected(&self) -> bool {
        self.status == Status::Rejected
    }
}
