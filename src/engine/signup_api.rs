use async_trait::async_trait;

use super::Engine;

use crate::{api::SignupAPI, entities::SignupRecord, error::Error};

impl Engine {
    /// Read failures on the admin views show up as an empty table.
    async fn signups_or_empty(&self) -> Vec<SignupRecord> {
        match self.signups.get_all().await {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(%err, "signup table unreadable, treating as empty");
                vec![]
            }
        }
    }

    async fn filter_signups<P>(&self, predicate: P) -> Vec<SignupRecord>
    where
        P: Fn(&SignupRecord) -> bool + Send,
    {
        self.signups_or_empty()
            .await
            .into_iter()
            .filter(|record| predicate(record))
            .collect()
    }
}

#[async_trait]
impl SignupAPI for Engine {
    #[tracing::instrument(skip(self))]
    async fn list_signups(&self) -> Result<Vec<SignupRecord>, Error> {
        Ok(self.signups_or_empty().await)
    }

    #[tracing::instrument(skip(self))]
    async fn find_signup(&self, email: &str) -> Result<SignupRecord, Error> {
        let record = match self.signups.find_by_key(email).await {
            Ok(record) => record,
            Err(err) => {
                tracing::warn!(%err, "signup table unreadable, treating as empty");
                None
            }
        };

        record.ok_or_else(|| Error::not_found_error().with_message("signup not found"))
    }

    #[tracing::instrument(skip(self))]
    async fn approved_free_members(&self) -> Result<Vec<SignupRecord>, Error> {
        Ok(self
            .filter_signups(SignupRecord::is_approved_free_member)
            .await)
    }

    #[tracing::instrument(skip(self))]
    async fn premium_members(&self) -> Result<Vec<SignupRecord>, Error> {
        Ok(self.filter_signups(SignupRecord::is_premium_member).await)
    }

    #[tracing::instrument(skip(self))]
    async fn rejected_signups(&self) -> Result<Vec<SignupRecord>, Error> {
        Ok(self.filter_signups(SignupRecord::is_rejected).await)
    }
}
