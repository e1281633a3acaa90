pub mod sheet;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::db::PgStore;
use crate::entities::{AdminUser, SignupPatch, SignupRecord};
use crate::error::Error;

pub use sheet::{SheetAdminUsers, SheetStore};

/// Signup records keyed by email.
///
/// An absent backing table reads as empty. `update_by_key` is atomic with
/// respect to other updates made through the same store.
#[async_trait]
pub trait SignupStore: Send + Sync {
    async fn get_all(&self) -> Result<Vec<SignupRecord>, Error>;

    async fn find_by_key(&self, email: &str) -> Result<Option<SignupRecord>, Error> {
        let records = self.get_all().await?;

        Ok(records.into_iter().find(|record| record.email == email))
    }

    /// Returns `None`, without writing, when no record has this email.
    async fn update_by_key(
        &self,
        email: &str,
        patch: &SignupPatch,
    ) -> Result<Option<SignupRecord>, Error>;
}

#[async_trait]
pub trait AdminUserStore: Send + Sync {
    async fn get_all(&self) -> Result<Vec<AdminUser>, Error>;
}

pub type DynSignupStore = Arc<dyn SignupStore>;
pub type DynAdminUserStore = Arc<dyn AdminUserStore>;

/// Opens Postgres when a database url is configured, the sheet files
/// otherwise.
#[tracing::instrument(name = "store::open", skip_all)]
pub async fn open(config: &Config) -> Result<(DynSignupStore, DynAdminUserStore), Error> {
    match &config.database_url {
        Some(url) => {
            let store = Arc::new(PgStore::new(url, config.database_max_connections).await?);
            tracing::info!("using postgres store");

            let signups: DynSignupStore = store.clone();
            let admin_users: DynAdminUserStore = store;

            Ok((signups, admin_users))
        }
        None => {
            tracing::info!(
                signups = %config.signups_path.display(),
                admin_users = %config.admin_users_path.display(),
                "using sheet store"
            );

            let signups: DynSignupStore = Arc::new(SheetStore::open(&config.signups_path));
            let admin_users: DynAdminUserStore =
                Arc::new(SheetAdminUsers::open(&config.admin_users_path));

            Ok((signups, admin_users))
        }
    }
}
