use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::entities::{Action, AdminUser, SignupRecord};
use crate::error::Error;

/// Read side of the signup table, including the admin views.
#[async_trait]
pub trait SignupAPI {
    async fn list_signups(&self) -> Result<Vec<SignupRecord>, Error>;
    async fn find_signup(&self, email: &str) -> Result<SignupRecord, Error>;
    async fn approved_free_members(&self) -> Result<Vec<SignupRecord>, Error>;
    async fn premium_members(&self) -> Result<Vec<SignupRecord>, Error>;
    async fn rejected_signups(&self) -> Result<Vec<SignupRecord>, Error>;
}

#[async_trait]
pub trait ControllerActionAPI {
    async fn apply_action(&self, request: ActionRequest) -> Result<ActionOutcome, Error>;
}

#[async_trait]
pub trait AmbassadorAPI {
    async fn find_ambassador(&self, username: &str) -> Result<Option<AdminUser>, Error>;
    fn referral_url(&self, ambassador: &AdminUser) -> Result<String, Error>;
    fn signup_page_path(&self) -> &str;
}

pub trait API: SignupAPI + ControllerActionAPI + AmbassadorAPI {}

pub type DynAPI = Arc<dyn API + Send + Sync>;

/// Fields are optional so a missing one is reported as invalid input
/// rather than a body rejection.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ActionRequest {
    pub email: Option<String>,
    pub action: Option<String>,
    pub reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub success: bool,
    pub message: String,
    pub email: String,
    pub action: Action,
}
