use serde::{Deserialize, Serialize};

use super::Fields;

pub const AMBASSADOR_ROLE: &str = "ambassador";

/// Back-office identity. Ambassadors own a vanity URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub role: String,
    #[serde(flatten)]
    pub fields: Fields,
}

impl AdminUser {
    pub fn from_fields(mut fields: Fields) -> Self {
        Self {
            id: fields.remove("id").unwrap_or_default(),
            username: fields.remove("username").unwrap_or_default(),
            role: fields.remove("role").unwrap_or_default(),
            fields,
        }
    }

    pub fn is_ambassador(&self) -> bool {
        self.role == AMBASSADOR_ROLE
    }

    /// Case-sensitive, as usernames are in vanity URLs.
    pub fn is_ambassador_named(&self, username: &str) -> bool {
        self.is_ambassador() && self.username == username
    }
}
