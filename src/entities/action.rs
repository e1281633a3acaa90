use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::signup::{STATUS, WHY_JOIN_REASON};
use super::{SignupPatch, Status};
use crate::error::Error;

/// Admin decision on a signup. Any current status may be overridden.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Approve,
    Reject,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }

    pub fn target_status(&self) -> Status {
        match self {
            Self::Approve => Status::Approved,
            Self::Reject => Status::Rejected,
        }
    }

    pub fn patch(&self, reason: Option<&str>) -> SignupPatch {
        let patch = SignupPatch::new().set(STATUS, self.target_status().name());

        match (self, reason) {
            (Self::Reject, Some(reason)) if !reason.is_empty() => {
                patch.prefix(WHY_JOIN_REASON, format!("[REJECTED: {}] ", reason))
            }
            _ => patch,
        }
    }
}

impl FromStr for Action {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approve" => Ok(Self::Approve),
            "reject" => Ok(Self::Reject),
            _ => Err(Error::invalid_input_error()
                .with_message("invalid action, must be 'approve' or 'reject'")),
        }
    }
}
