use std::env::{self, VarError};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::Error;

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Selects the Postgres store when set.
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub signups_path: PathBuf,
    pub admin_users_path: PathBuf,
    /// Where ambassador links send prospects.
    pub signup_page_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        Self::from_vars(|name| env::var(name))
    }

    pub fn from_vars<F>(var: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let optional = |name: &str| -> Result<Option<String>, Error> {
            match var(name) {
                Ok(value) if value.is_empty() => Ok(None),
                Ok(value) => Ok(Some(value)),
                Err(VarError::NotPresent) => Ok(None),
                Err(err) => Err(err.into()),
            }
        };

        Ok(Self {
            bind_addr: optional("BIND_ADDR")?
                .unwrap_or_else(|| "127.0.0.1:3000".into())
                .parse()?,
            database_url: optional("DATABASE_URL")?,
            database_max_connections: optional("DATABASE_MAX_CONNECTIONS")?
                .unwrap_or_else(|| "5".into())
                .parse()?,
            signups_path: optional("SIGNUPS_PATH")?
                .unwrap_or_else(|| "data/signups.json".into())
                .into(),
            admin_users_path: optional("ADMIN_USERS_PATH")?
                .unwrap_or_else(|| "data/admin_users.json".into())
                .into(),
            signup_page_path: optional("SIGNUP_PAGE_PATH")?.unwrap_or_else(|| "/signup".into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, VarError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        move |name: &str| map.get(name).cloned().ok_or(VarError::NotPresent)
    }

    #[test]
    fn defaults() {
        let config = Config::from_vars(vars(&[])).unwrap();

        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse().unwrap());
        assert_eq!(config.database_url, None);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.signups_path, PathBuf::from("data/signups.json"));
        assert_eq!(config.admin_users_path, PathBuf::from("data/admin_users.json"));
        assert_eq!(config.signup_page_path, "/signup");
    }

    #[test]
    fn overrides() {
        let config = Config::from_vars(vars(&[
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("DATABASE_URL", "postgresql://academy@localhost/academy"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
            ("SIGNUP_PAGE_PATH", "/join"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgresql://academy@localhost/academy")
        );
        assert_eq!(config.database_max_connections, 12);
        assert_eq!(config.signup_page_path, "/join");
    }

    #[test]
    fn malformed_values_are_errors() {
        assert!(Config::from_vars(vars(&[("BIND_ADDR", "nowhere")])).is_err());
        assert!(Config::from_vars(vars(&[("DATABASE_MAX_CONNECTIONS", "many")])).is_err());
    }
}
