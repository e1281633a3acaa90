//! Tables kept as a JSON array of rows, the first row naming the columns.
//!
//! ```json
//! [["email", "status", "planType"],
//!  ["a@x.com", "pending", "free"]]
//! ```
//!
//! Cells may be any JSON value and are read as strings.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::{AdminUserStore, SignupStore};
use crate::entities::{AdminUser, Fields, SignupPatch, SignupRecord};
use crate::error::Error;

#[derive(Debug, Default)]
pub struct Sheet {
    header: Vec<String>,
    rows: Vec<Vec<Value>>,
}

fn cell_to_string(cell: &Value) -> String {
    match cell {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

impl Sheet {
    /// `None` when the file does not exist.
    pub async fn load(path: &Path) -> Result<Option<Self>, Error> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let mut rows: Vec<Vec<Value>> = serde_json::from_slice(&bytes)?;
        if rows.is_empty() {
            return Ok(Some(Self::default()));
        }

        let header = rows.remove(0).iter().map(cell_to_string).collect();

        Ok(Some(Self { header, rows }))
    }

    pub async fn save(&self, path: &Path) -> Result<(), Error> {
        let header: Vec<Value> = self.header.iter().cloned().map(Value::String).collect();
        let table: Vec<&Vec<Value>> = std::iter::once(&header).chain(&self.rows).collect();
        let bytes = serde_json::to_vec_pretty(&table)?;

        let mut tmp = OsString::from(path.as_os_str());
        tmp.push(format!(".{}.tmp", Uuid::new_v4()));
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, bytes).await?;
        if let Err(err) = tokio::fs::rename(&tmp, path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(err.into());
        }

        Ok(())
    }

    fn len(&self) -> usize {
        self.rows.len()
    }

    /// Columns with an empty name are dropped; short rows read as empty cells.
    pub fn fields(&self, index: usize) -> Fields {
        let row = &self.rows[index];

        self.header
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.is_empty())
            .map(|(i, name)| {
                let cell = row.get(i).map(cell_to_string).unwrap_or_default();
                (name.clone(), cell)
            })
            .collect()
    }

    pub fn records(&self) -> impl Iterator<Item = Fields> + '_ {
        (0..self.rows.len()).map(|index| self.fields(index))
    }

    /// Appends the column if the header does not have it yet.
    pub fn set_cell(&mut self, index: usize, column: &str, value: String) {
        let position = match self.header.iter().position(|name| name == column) {
            Some(position) => position,
            None => {
                self.header.push(column.into());
                self.header.len() - 1
            }
        };

        let row = &mut self.rows[index];
        if row.len() <= position {
            row.resize(position + 1, Value::Null);
        }
        row[position] = Value::String(value);
    }
}

/// Signup records backed by a sheet file.
///
/// Reads go to the file every time so rows added by the signup flow show up.
/// Updates hold `write_lock` across load, patch, and save.
#[derive(Debug)]
pub struct SheetStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl SheetStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl SignupStore for SheetStore {
    #[tracing::instrument(name = "SheetStore::get_all", skip(self), fields(path = %self.path.display()))]
    async fn get_all(&self) -> Result<Vec<SignupRecord>, Error> {
        let sheet = match Sheet::load(&self.path).await? {
            Some(sheet) => sheet,
            None => return Ok(vec![]),
        };

        Ok(sheet.records().filter_map(SignupRecord::from_fields).collect())
    }

    #[tracing::instrument(name = "SheetStore::update_by_key", skip(self, patch), fields(path = %self.path.display()))]
    async fn update_by_key(
        &self,
        email: &str,
        patch: &SignupPatch,
    ) -> Result<Option<SignupRecord>, Error> {
        let _guard = self.write_lock.lock().await;

        let mut sheet = match Sheet::load(&self.path).await? {
            Some(sheet) => sheet,
            None => return Ok(None),
        };

        // rows without an email are not records, same as on read
        let found = (0..sheet.len())
            .map(|index| (index, sheet.fields(index)))
            .find(|(_, fields)| match fields.get("email") {
                Some(cell) => !cell.is_empty() && cell == email,
                None => false,
            });

        let (index, mut fields) = match found {
            Some(found) => found,
            None => return Ok(None),
        };

        patch.merge_into(&mut fields)?;

        // only patched cells are rewritten
        for (field, _) in patch.updates() {
            let value = fields.get(field).cloned().unwrap_or_default();
            sheet.set_cell(index, field, value);
        }

        sheet.save(&self.path).await?;

        Ok(SignupRecord::from_fields(fields))
    }
}

/// Read-only admin users backed by a sheet file.
#[derive(Debug)]
pub struct SheetAdminUsers {
    path: PathBuf,
}

impl SheetAdminUsers {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AdminUserStore for SheetAdminUsers {
    #[tracing::instrument(name = "SheetAdminUsers::get_all", skip(self), fields(path = %self.path.display()))]
    async fn get_all(&self) -> Result<Vec<AdminUser>, Error> {
        let sheet = match Sheet::load(&self.path).await? {
            Some(sheet) => sheet,
            None => return Ok(vec![]),
        };

        Ok(sheet
            .records()
            .filter(|fields| fields.values().any(|cell| !cell.is_empty()))
            .map(AdminUser::from_fields)
            .collect())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::path::PathBuf;

    use uuid::Uuid;

    pub fn temp_path() -> PathBuf {
        std::env::temp_dir().join(format!("academy-signups-{}.json", Uuid::new_v4()))
    }

    pub fn temp_sheet(rows: serde_json::Value) -> PathBuf {
        let path = temp_path();
        std::fs::write(&path, serde_json::to_vec(&rows).unwrap()).unwrap();
        path
    }

    pub fn signups() -> PathBuf {
        temp_sheet(serde_json::json!([
            ["email", "status", "planType", "whyJoinReason", "firstName", "age"],
            ["a@x.com", "pending", "free", "", "Ana", 14],
            ["b@x.com", "approved", "free", "train more", "Ben", 15],
            ["c@x.com", "approved", "elite", "", "Cat", null],
            ["d@x.com", "rejected", "pro", "[REJECTED: too old] hi", "Dan", 30],
            ["e@x.com", "pending", "pro", "", "Eve", 12],
            ["", "", "", "", "", ""]
        ]))
    }

    pub fn admin_users() -> PathBuf {
        temp_sheet(serde_json::json!([
            ["id", "username", "role"],
            [42, "alice", "ambassador"],
            ["7", "bob", "admin"],
            ["x y", "carol", "ambassador"],
            [null, null, null]
        ]))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::fixtures;
    use super::*;
    use crate::entities::{Action, PlanType, Status};

    #[tokio::test]
    async fn absent_file_reads_as_empty() {
        let store = SheetStore::open(fixtures::temp_path());

        assert!(store.get_all().await.unwrap().is_empty());
        assert!(store.find_by_key("a@x.com").await.unwrap().is_none());
        assert!(store
            .update_by_key("a@x.com", &Action::Approve.patch(None))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn unreadable_file_is_an_error() {
        let path = fixtures::temp_path();
        std::fs::write(&path, b"not a sheet").unwrap();

        let err = SheetStore::open(&path).get_all().await.unwrap_err();
        assert!(err.is_internal_error());
    }

    #[tokio::test]
    async fn cells_are_coerced_to_strings() {
        let store = SheetStore::open(fixtures::signups());
        let records = store.get_all().await.unwrap();

        assert_eq!(records.len(), 5);
        assert_eq!(records[0].fields["age"], "14");
        assert_eq!(records[2].fields["age"], "");
        assert_eq!(records[2].plan_type, PlanType::Elite);
    }

    #[tokio::test]
    async fn find_by_key_returns_every_stored_record() {
        let store = SheetStore::open(fixtures::signups());

        for record in store.get_all().await.unwrap() {
            let found = store.find_by_key(&record.email).await.unwrap();
            assert_eq!(found, Some(record));
        }

        assert!(store.find_by_key("A@X.COM").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_rewrites_only_patched_cells() {
        let path = fixtures::temp_sheet(json!([
            ["email", "status", "planType", "score"],
            ["a@x.com", "", "", 9.5],
            ["b@x.com", "pending", "free", 1]
        ]));
        let store = SheetStore::open(&path);

        let updated = store
            .update_by_key("a@x.com", &Action::Approve.patch(None))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, Status::Approved);

        let raw: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(
            raw,
            json!([
                ["email", "status", "planType", "score"],
                ["a@x.com", "approved", "", 9.5],
                ["b@x.com", "pending", "free", 1]
            ])
        );
    }

    #[tokio::test]
    async fn blank_rows_are_never_updated() {
        let path = fixtures::signups();
        let before = std::fs::read(&path).unwrap();
        let store = SheetStore::open(&path);

        let updated = store
            .update_by_key("", &Action::Approve.patch(None))
            .await
            .unwrap();

        assert!(updated.is_none());
        assert_eq!(std::fs::read(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn new_columns_are_appended() {
        let path = fixtures::temp_sheet(json!([["email", "status"], ["a@x.com", "pending"]]));
        let store = SheetStore::open(&path);

        store
            .update_by_key("a@x.com", &Action::Reject.patch(Some("no reason given")))
            .await
            .unwrap();

        let raw: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(
            raw,
            json!([
                ["email", "status", "whyJoinReason"],
                ["a@x.com", "rejected", "[REJECTED: no reason given] "]
            ])
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_updates_are_not_lost() {
        let store = Arc::new(SheetStore::open(fixtures::signups()));

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let patch = Action::Reject.patch(Some(i.to_string().as_str()));
                    let updated = store.update_by_key("a@x.com", &patch).await?;
                    Ok::<_, Error>(updated.is_some())
                })
            })
            .collect();

        for task in tasks {
            assert!(task.await.unwrap().unwrap());
        }

        let record = store.find_by_key("a@x.com").await.unwrap().unwrap();
        for i in 0..16 {
            assert!(record
                .why_join_reason
                .contains(&format!("[REJECTED: {}] ", i)));
        }
    }

    #[tokio::test]
    async fn admin_users_skip_blank_rows() {
        let users = SheetAdminUsers::open(fixtures::admin_users())
            .get_all()
            .await
            .unwrap();

        assert_eq!(users.len(), 3);
        assert_eq!(users[0].id, "42");
        assert_eq!(users[0].username, "alice");
    }
}
