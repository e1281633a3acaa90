use async_trait::async_trait;

use super::Engine;

use crate::{
    api::{ActionOutcome, ActionRequest, ControllerActionAPI},
    entities::Action,
    error::Error,
};

/// Empty strings count as missing.
fn required(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.is_empty())
}

#[async_trait]
impl ControllerActionAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn apply_action(&self, request: ActionRequest) -> Result<ActionOutcome, Error> {
        let (email, action) = match (required(request.email), required(request.action)) {
            (Some(email), Some(action)) => (email, action),
            _ => {
                return Err(Error::invalid_input_error().with_message("email and action are required"))
            }
        };

        let action: Action = action.parse()?;
        let patch = action.patch(request.reason.as_deref());

        let record = self
            .signups
            .update_by_key(&email, &patch)
            .await?
            .ok_or_else(|| Error::not_found_error().with_message("signup not found"))?;

        tracing::info!(email = %record.email, action = action.name(), "signup updated");

        Ok(ActionOutcome {
            success: true,
            message: format!("signup {}", record.status.name()),
            email: record.email,
            action,
        })
    }
}
