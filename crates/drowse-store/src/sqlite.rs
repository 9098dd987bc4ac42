//! SQLite implementation of the runtime state backend

use crate::{StateBackend, StoreError};
use drowse_domain::{ResourceId, ResourceRecord};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::Mutex;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS records (
    id            INTEGER PRIMARY KEY,
    idle_since_ms INTEGER NOT NULL,
    protected     INTEGER NOT NULL DEFAULT 0
)";

/// SQLite-backed runtime store.
///
/// One row per tracked resource. The user pin is a column on the record
/// row, so removing a record drops the pin with it and each mutation is
/// atomic at row granularity.
///
/// ## Thread Safety
///
/// The connection is guarded by a mutex; every call is a short,
/// synchronous statement.
pub struct SqliteStateBackend {
    conn: Mutex<Connection>,
}

impl SqliteStateBackend {
    /// Open (creating if needed) the runtime store at `path`.
    ///
    /// Use `:memory:` for a store that lives only as long as the
    /// connection.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl StateBackend for SqliteStateBackend {
    fn load(&self) -> Result<Vec<(ResourceId, ResourceRecord)>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, idle_since_ms, protected FROM records")?;
        let rows = stmt.query_map([], |row| {
            let id: i64 = row.get(0)?;
            let idle_since_ms: i64 = row.get(1)?;
            let protected: bool = row.get(2)?;
            Ok((
                ResourceId::from_value(id as u64),
                ResourceRecord {
                    idle_since_ms: idle_since_ms as u64,
                    protected,
                },
            ))
        })?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    fn put(&self, id: ResourceId, record: &ResourceRecord) -> Result<(), StoreError> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT OR REPLACE INTO records (id, idle_since_ms, protected) VALUES (?1, ?2, ?3)",
            params![
                id.value() as i64,
                record.idle_since_ms as i64,
                record.protected
            ],
        )?;
        Ok(())
    }

    fn delete(&self, ids: &[ResourceId]) -> Result<(), StoreError> {
        if ids.is_empty() {
            return Ok(());
        }
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare("DELETE FROM records WHERE id = ?1")?;
            for id in ids {
                stmt.execute(params![id.value() as i64])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn flush(&self) -> Result<(), StoreError> {
        // SQLite commits each statement as it runs; nothing is buffered.
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_load_delete_roundtrip() {
        let backend = SqliteStateBackend::open(":memory:").unwrap();
        let id = ResourceId::from_value(12);
        let record = ResourceRecord {
            idle_since_ms: 42_000,
            protected: true,
        };

        backend.put(id, &record).unwrap();
        assert_eq!(backend.load().unwrap(), vec![(id, record)]);

        backend.delete(&[id]).unwrap();
        assert!(backend.load().unwrap().is_empty());
    }

    #[test]
    fn put_replaces_existing_row() {
        let backend = SqliteStateBackend::open(":memory:").unwrap();
        let id = ResourceId::from_value(3);

        backend.put(id, &ResourceRecord::fresh(100)).unwrap();
        backend
            .put(
                id,
                &ResourceRecord {
                    idle_since_ms: 200,
                    protected: true,
                },
            )
            .unwrap();

        let records = backend.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].1.idle_since_ms, 200);
        assert!(records[0].1.protected);
    }

    #[test]
    fn records_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.db");
        let id = ResourceId::from_value(8);
        let record = ResourceRecord::fresh(77_000);

        {
            let backend = SqliteStateBackend::open(&path).unwrap();
            backend.put(id, &record).unwrap();
        }

        let backend = SqliteStateBackend::open(&path).unwrap();
        assert_eq!(backend.load().unwrap(), vec![(id, record)]);
    }

    #[test]
    fn delete_of_empty_slice_is_a_no_op() {
        let backend = SqliteStateBackend::open(":memory:").unwrap();
        backend.delete(&[]).unwrap();
    }
}
