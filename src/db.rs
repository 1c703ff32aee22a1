use crate::error::{Result, TodoError};
use crate::models::Task;
use rusqlite::{Connection, Row, Transaction};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default database file, relative to the working directory
pub const DEFAULT_DB_FILE: &str = "todo-database.db";

/// Database handle
pub struct Database {
    conn: Connection,
    path: PathBuf,
}

impl Database {
    /// Open (or create) the database file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let unavailable = |source| TodoError::StorageUnavailable {
            path: path.clone(),
            source,
        };

        let conn = Connection::open(&path).map_err(unavailable)?;
        // SQLite opens lazily; touch the header so unreadable files fail here
        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .map_err(unavailable)?;

        info!(path = %path.display(), "database connection created");
        Ok(Database { conn, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the task table if it does not exist yet
    pub fn ensure_schema(&self) -> Result<()> {
        create_table(&self.conn)
    }

    /// Begin a unit of work for one user command.
    ///
    /// Nothing the session does is visible after a restart until
    /// [`Session::commit`] is called; dropping the session rolls back.
    pub fn begin(&mut self) -> Result<Session<'_>> {
        let tx = self.conn.transaction()?;
        Ok(Session { tx })
    }

    /// Release the connection
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.conn.close().map_err(|(_, e)| TodoError::Db(e))?;
        info!(path = %path.display(), "database connection closed");
        Ok(())
    }
}

/// One transaction against the task table
pub struct Session<'a> {
    tx: Transaction<'a>,
}

impl Session<'_> {
    pub fn insert(&self, description: &str) -> Result<Task> {
        self.tx
            .execute(
                "INSERT INTO todo_table (description) VALUES (?1)",
                [description],
            )
            .map_err(|e| unique_violation(e, description))?;

        let id = self.tx.last_insert_rowid();
        debug!(id, "task inserted");
        Ok(Task::new(id, description))
    }

    /// Delete by id. Returns the number of rows removed (0 for unknown ids).
    pub fn delete(&self, id: i64) -> Result<usize> {
        let rows = self
            .tx
            .execute("DELETE FROM todo_table WHERE id = ?1", [id])?;
        let remaining = self.count()?;
        debug!(id, rows, remaining, "task deleted");
        Ok(rows)
    }

    /// Replace a task's description. Returns the number of rows changed.
    pub fn update(&self, id: i64, description: &str) -> Result<usize> {
        let rows = self
            .tx
            .execute(
                "UPDATE todo_table SET description = ?1 WHERE id = ?2",
                (description, id),
            )
            .map_err(|e| unique_violation(e, description))?;
        debug!(id, rows, "task updated");
        Ok(rows)
    }

    pub fn list_all(&self) -> Result<Vec<Task>> {
        let mut stmt = self
            .tx
            .prepare("SELECT id, description FROM todo_table ORDER BY id")?;

        let tasks = stmt.query_map([], task_from_row)?;
        tasks
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| e.into())
    }

    pub fn count(&self) -> Result<i64> {
        self.tx
            .query_row("SELECT COUNT(*) FROM todo_table", [], |row| row.get(0))
            .map_err(|e| e.into())
    }

    /// Drop every task and recreate the empty table
    pub fn clear_all(&self) -> Result<()> {
        self.tx.execute("DROP TABLE todo_table", [])?;
        create_table(&self.tx)?;
        let remaining = self.count()?;
        debug!(remaining, "task table reset");
        Ok(())
    }

    pub fn commit(self) -> Result<()> {
        self.tx.commit().map_err(|e| e.into())
    }
}

fn create_table(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS todo_table (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            description TEXT NOT NULL UNIQUE
        )",
        [],
    )?;
    Ok(())
}

fn unique_violation(err: rusqlite::Error, description: &str) -> TodoError {
    match &err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            TodoError::DuplicateDescription(description.to_string())
        }
        _ => err.into(),
    }
}

fn task_from_row(row: &Row) -> std::result::Result<Task, rusqlite::Error> {
    Ok(Task {
        id: row.get(0)?,
        description: row.get(1)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, Database) {
        let dir = TempDir::new().unwrap();
        let db = Database::open(dir.path().join("todo.db")).unwrap();
        db.ensure_schema().unwrap();
        (dir, db)
    }

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let (_dir, mut db) = open_temp();
        db.ensure_schema().unwrap();
        db.ensure_schema().unwrap();

        let session = db.begin().unwrap();
        assert_eq!(session.count().unwrap(), 0);
    }

    #[test]
    fn test_open_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let result = Database::open(dir.path().join("missing").join("todo.db"));
        assert!(matches!(
            result,
            Err(TodoError::StorageUnavailable { .. })
        ));
    }

    #[test]
    fn test_open_non_database_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.db");
        std::fs::write(&path, "not an sqlite database\n".repeat(64)).unwrap();

        let result = Database::open(&path);
        assert!(matches!(
            result,
            Err(TodoError::StorageUnavailable { .. })
        ));
    }

    #[test]
    fn test_insert_then_list() {
        let (_dir, mut db) = open_temp();
        let session = db.begin().unwrap();

        let task = session.insert("Buy milk").unwrap();
        assert_eq!(task, Task::new(1, "Buy milk"));
        assert_eq!(session.list_all().unwrap(), vec![Task::new(1, "Buy milk")]);
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let (_dir, mut db) = open_temp();
        {
            let session = db.begin().unwrap();
            session.insert("Buy milk").unwrap();
            session.commit().unwrap();
        }

        let session = db.begin().unwrap();
        let err = session.insert("Buy milk").unwrap_err();
        assert!(matches!(err, TodoError::DuplicateDescription(ref d) if d == "Buy milk"));
        assert_eq!(session.count().unwrap(), 1);
    }

    #[test]
    fn test_delete_missing_id_is_noop() {
        let (_dir, mut db) = open_temp();
        let session = db.begin().unwrap();
        session.insert("a").unwrap();
        session.insert("b").unwrap();

        assert_eq!(session.delete(42).unwrap(), 0);
        assert_eq!(session.count().unwrap(), 2);

        assert_eq!(session.delete(1).unwrap(), 1);
        assert_eq!(session.list_all().unwrap(), vec![Task::new(2, "b")]);
    }

    #[test]
    fn test_update_preserves_id_and_count() {
        let (_dir, mut db) = open_temp();
        let session = db.begin().unwrap();
        session.insert("a").unwrap();
        session.insert("b").unwrap();

        assert_eq!(session.update(2, "c").unwrap(), 1);
        assert_eq!(
            session.list_all().unwrap(),
            vec![Task::new(1, "a"), Task::new(2, "c")]
        );

        assert_eq!(session.update(99, "z").unwrap(), 0);
        assert_eq!(session.count().unwrap(), 2);
    }

    #[test]
    fn test_update_to_existing_description_rejected() {
        let (_dir, mut db) = open_temp();
        let session = db.begin().unwrap();
        session.insert("a").unwrap();
        session.insert("b").unwrap();

        let err = session.update(2, "a").unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(
            session.list_all().unwrap(),
            vec![Task::new(1, "a"), Task::new(2, "b")]
        );
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let (_dir, mut db) = open_temp();
        let session = db.begin().unwrap();
        session.insert("a").unwrap();
        session.insert("b").unwrap();
        session.delete(2).unwrap();

        let task = session.insert("c").unwrap();
        assert_eq!(task.id, 3);
    }

    #[test]
    fn test_clear_all_keeps_table_queryable() {
        let (_dir, mut db) = open_temp();
        {
            let session = db.begin().unwrap();
            session.insert("a").unwrap();
            session.insert("b").unwrap();
            session.clear_all().unwrap();
            session.commit().unwrap();
        }

        let session = db.begin().unwrap();
        assert_eq!(session.count().unwrap(), 0);
        assert!(session.list_all().unwrap().is_empty());
        assert_eq!(session.insert("fresh").unwrap().id, 1);
    }

    #[test]
    fn test_dropped_session_rolls_back() {
        let (_dir, mut db) = open_temp();
        {
            let session = db.begin().unwrap();
            session.insert("kept").unwrap();
            session.commit().unwrap();
        }
        {
            let session = db.begin().unwrap();
            session.insert("lost").unwrap();
            session.clear_all().unwrap();
        }

        let session = db.begin().unwrap();
        assert_eq!(session.list_all().unwrap(), vec![Task::new(1, "kept")]);
    }

    #[test]
    fn test_committed_data_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("todo.db");

        let mut db = Database::open(&path).unwrap();
        assert_eq!(db.path(), path.as_path());
        db.ensure_schema().unwrap();
        let session = db.begin().unwrap();
        session.insert("Buy milk").unwrap();
        session.commit().unwrap();
        db.close().unwrap();

        let mut db = Database::open(&path).unwrap();
        db.ensure_schema().unwrap();
        let session = db.begin().unwrap();
        assert_eq!(session.list_all().unwrap(), vec![Task::new(1, "Buy milk")]);
    }
}
