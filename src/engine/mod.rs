mod action_api;
mod ambassador_api;
mod signup_api;

use std::sync::Arc;

use crate::{
    api::API,
    config::Config,
    error::Error,
    store::{self, AdminUserStore, SignupStore},
};

pub struct Engine {
    signups: Arc<dyn SignupStore>,
    admin_users: Arc<dyn AdminUserStore>,
    signup_page_path: String,
}

impl Engine {
    pub fn new(
        signups: Arc<dyn SignupStore>,
        admin_users: Arc<dyn AdminUserStore>,
        signup_page_path: impl Into<String>,
    ) -> Self {
        Self {
            signups,
            admin_users,
            signup_page_path: signup_page_path.into(),
        }
    }

    #[tracing::instrument(name = "Engine::from_config", skip_all)]
    pub async fn from_config(config: &Config) -> Result<Self, Error> {
        let (signups, admin_users) = store::open(config).await?;

        Ok(Self::new(
            signups,
            admin_users,
            config.signup_page_path.clone(),
        ))
    }
}

impl API for Engine {}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_engine_from_sheet_config() {
        use crate::api::SignupAPI;
        use crate::store::sheet::fixtures;
        use tokio_test::block_on;

        let mut config = Config::from_vars(|_| Err(std::env::VarError::NotPresent)).unwrap();
        config.signups_path = fixtures::signups();
        config.admin_users_path = fixtures::admin_users();
        config.signup_page_path = "/join".into();

        let engine = block_on(Engine::from_config(&config)).unwrap();

        assert_eq!(block_on(engine.list_signups()).unwrap().len(), 5);
        assert_eq!(engine.signup_page_path, "/join");
    }
}
