use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::{postgres::PgPoolOptions, types::Json, Executor, Pool, Postgres, Row};

use crate::entities::{AdminUser, SignupPatch, SignupRecord};
use crate::error::Error;
use crate::store::{AdminUserStore, SignupStore};

type Database = Postgres;

/// Both tables in Postgres. Each row keeps the full record in `data`; the
/// other columns mirror it for lookups.
#[derive(Debug)]
pub struct PgStore {
    pool: Pool<Database>,
}

impl PgStore {
    #[tracing::instrument(name = "PgStore::new", skip_all)]
    pub async fn new(db_uri: &str, max_connections: u32) -> Result<Self, Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(db_uri)
            .await?;

        pool.execute("CREATE TABLE IF NOT EXISTS signup_records (id SERIAL PRIMARY KEY, email VARCHAR NOT NULL UNIQUE, status VARCHAR NOT NULL, plan_type VARCHAR NOT NULL, data JSONB NOT NULL)")
            .await?;
        pool.execute("CREATE TABLE IF NOT EXISTS admin_users (id VARCHAR PRIMARY KEY, username VARCHAR NOT NULL, role VARCHAR NOT NULL, data JSONB NOT NULL)")
            .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl SignupStore for PgStore {
    #[tracing::instrument(name = "PgStore::get_all", skip(self))]
    async fn get_all(&self) -> Result<Vec<SignupRecord>, Error> {
        let mut rows = sqlx::query("SELECT data FROM signup_records ORDER BY id").fetch(&self.pool);

        let mut records = vec![];
        while let Some(row) = rows.try_next().await? {
            let Json(record): Json<SignupRecord> = row.try_get("data")?;
            records.push(record);
        }

        Ok(records)
    }

    #[tracing::instrument(name = "PgStore::find_by_key", skip(self))]
    async fn find_by_key(&self, email: &str) -> Result<Option<SignupRecord>, Error> {
        let maybe_row = sqlx::query("SELECT data FROM signup_records WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        match maybe_row {
            Some(row) => {
                let Json(record): Json<SignupRecord> = row.try_get("data")?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    #[tracing::instrument(name = "PgStore::update_by_key", skip(self, patch))]
    async fn update_by_key(
        &self,
        email: &str,
        patch: &SignupPatch,
    ) -> Result<Option<SignupRecord>, Error> {
        let mut tx = self.pool.begin().await?;

        let maybe_row =
            sqlx::query("SELECT data FROM signup_records WHERE email = $1 FOR UPDATE")
                .bind(email)
                .fetch_optional(&mut tx)
                .await?;

        // dropping the transaction rolls it back
        let row = match maybe_row {
            Some(row) => row,
            None => return Ok(None),
        };

        let Json(record): Json<SignupRecord> = row.try_get("data")?;
        let record = record.apply(patch)?;

        sqlx::query(
            "UPDATE signup_records SET status = $2, plan_type = $3, data = $4 WHERE email = $1",
        )
        .bind(email)
        .bind(record.status.name())
        .bind(record.plan_type.name())
        .bind(Json(&record))
        .execute(&mut tx)
        .await?;

        tx.commit().await?;

        Ok(Some(record))
    }
}

#[async_trait]
impl AdminUserStore for PgStore {
    #[tracing::instrument(name = "PgStore::get_all_admin_users", skip(self))]
    async fn get_all(&self) -> Result<Vec<AdminUser>, Error> {
        let mut rows = sqlx::query("SELECT data FROM admin_users").fetch(&self.pool);

        let mut users = vec![];
        while let Some(row) = rows.try_next().await? {
            let Json(user): Json<AdminUser> = row.try_get("data")?;
            users.push(user);
        }

        Ok(users)
    }
}
