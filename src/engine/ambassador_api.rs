use async_trait::async_trait;

use super::Engine;

use crate::{api::AmbassadorAPI, entities::AdminUser, error::Error};

#[async_trait]
impl AmbassadorAPI for Engine {
    /// An unreadable admin table resolves to no ambassador.
    #[tracing::instrument(skip(self))]
    async fn find_ambassador(&self, username: &str) -> Result<Option<AdminUser>, Error> {
        let users = match self.admin_users.get_all().await {
            Ok(users) => users,
            Err(err) => {
                tracing::warn!(%err, "admin user table unreadable, treating as empty");
                return Ok(None);
            }
        };

        Ok(users
            .into_iter()
            .find(|user| user.is_ambassador_named(username)))
    }

    fn referral_url(&self, ambassador: &AdminUser) -> Result<String, Error> {
        let query = serde_urlencoded::to_string([("ref", ambassador.id.as_str())])
            .map_err(Error::serialization_error)?;

        Ok(format!("{}?{}", self.signup_page_path, query))
    }

    fn signup_page_path(&self) -> &str {
        &self.signup_page_path
    }
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::{empty_engine, engine};
    use super::*;

    #[tokio::test]
    async fn ambassador_resolves_to_referral_url() {
        let engine = engine();

        let alice = engine.find_ambassador("alice").await.unwrap().unwrap();
        assert_eq!(alice.id, "42");
        assert_eq!(engine.referral_url(&alice).unwrap(), "/signup?ref=42");
    }

    #[tokio::test]
    async fn referral_id_is_encoded() {
        let engine = engine();

        let carol = engine.find_ambassador("carol").await.unwrap().unwrap();
        assert_eq!(engine.referral_url(&carol).unwrap(), "/signup?ref=x+y");
    }

    #[tokio::test]
    async fn only_ambassadors_match() {
        let engine = engine();

        assert!(engine.find_ambassador("bob").await.unwrap().is_none());
        assert!(engine.find_ambassador("Alice").await.unwrap().is_none());
        assert!(engine.find_ambassador("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn missing_table_matches_nothing() {
        assert!(empty_engine()
            .find_ambassador("alice")
            .await
            .unwrap()
            .is_none());
    }
}
