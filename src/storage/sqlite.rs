//! SQLite storage implementation

use std::path::Path;
use rusqlite::{Connection, params, OptionalExtension};
use crate::{Result, Error};
use crate::record::{Record, RecordFields};
use super::schema;

/// SQLite-backed storage for records
///
/// Every operation is a single auto-committed statement. The connection is
/// released when the store is dropped.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        tracing::debug!("Opened record store at {}", path.display());
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Record Operations ==========

    /// Insert a new record and return its assigned id
    pub fn create(&self, fields: &RecordFields) -> Result<i64> {
        let (image, signature) = fields.normalized_blobs();
        self.conn.execute(
            r#"
            INSERT INTO records (text, number, date, image, signature)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![fields.text, fields.number, fields.date, image, signature],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, "Created record");
        Ok(id)
    }

    /// Get a record by id, or `Error::RecordNotFound`
    pub fn read(&self, id: i64) -> Result<Record> {
        self.find(id)?.ok_or(Error::RecordNotFound(id))
    }

    /// Get a record by id if it exists
    pub fn find(&self, id: i64) -> Result<Option<Record>> {
        let sql = format!("SELECT {} FROM records WHERE id = ?1", schema::RECORD_COLUMNS);
        self.conn
            .query_row(&sql, [id], row_to_record)
            .optional()
            .map_err(Into::into)
    }

    /// Get every record.
    ///
    /// Rows come back in ascending id order, but callers should not depend on it.
    pub fn read_all(&self) -> Result<Vec<Record>> {
        let sql = format!("SELECT {} FROM records ORDER BY id", schema::RECORD_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;

        let records = stmt
            .query_map([], row_to_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(records)
    }

    /// Replace every field of the record with the given id.
    ///
    /// A missing id is not an error: nothing is written and `false` is returned.
    pub fn update(&self, id: i64, fields: &RecordFields) -> Result<bool> {
        let (image, signature) = fields.normalized_blobs();
        let changed = self.conn.execute(
            r#"
            UPDATE records
            SET text = ?1, number = ?2, date = ?3, image = ?4, signature = ?5
            WHERE id = ?6
            "#,
            params![fields.text, fields.number, fields.date, image, signature, id],
        )?;
        tracing::debug!(id, changed, "Updated record");
        Ok(changed > 0)
    }

    /// Delete the record with the given id.
    ///
    /// A missing id is not an error: `false` is returned.
    pub fn delete(&self, id: i64) -> Result<bool> {
        let changed = self.conn.execute("DELETE FROM records WHERE id = ?1", [id])?;
        tracing::debug!(id, changed, "Deleted record");
        Ok(changed > 0)
    }

    /// Count all records
    pub fn count(&self) -> Result<usize> {
        let count: i64 = self.conn.query_row("SELECT COUNT(*) FROM records", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

/// Helper to convert a row to a Record
///
/// NULL text/number/date columns (possible in tables written by other tools)
/// read back as empty values; empty blobs read back as absent.
fn row_to_record(row: &rusqlite::Row) -> rusqlite::Result<Record> {
    Ok(Record {
        id: row.get(0)?,
        fields: RecordFields {
            text: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            number: row.get::<_, Option<i64>>(2)?.unwrap_or_default(),
            date: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            image: non_empty_blob(row.get(4)?),
            signature: non_empty_blob(row.get(5)?),
        },
    })
}

fn non_empty_blob(blob: Option<Vec<u8>>) -> Option<Vec<u8>> {
    blob.filter(|b| !b.is_empty())
}
