//! Connection management: one serialized writer, pooled readers.

pub mod pool;
pub mod pragmas;

use std::path::Path;
use std::sync::Mutex;

use rusqlite::{Connection, Transaction, TransactionBehavior};
use vigil_core::errors::StorageError;

use crate::migrations;
use crate::queries::util::map_sqlite_err;

use self::pool::ReadPool;
use self::pragmas::{apply_pragmas, apply_read_pragmas};

/// Manages the single write connection and the read connection pool.
///
/// All writes go through `with_writer`/`with_tx`, which serialize on the
/// writer mutex. Reads round-robin over read-only connections — except in
/// in-memory mode, where the read pool would be a set of unrelated empty
/// databases, so reads are routed through the writer instead.
pub struct DatabaseManager {
    writer: Mutex<Connection>,
    readers: ReadPool,
    read_via_writer: bool,
}

impl DatabaseManager {
    /// Open a database at the given path, apply pragmas, run migrations.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        Self::open_with_pool_size(path, ReadPool::default_size())
    }

    /// Open with an explicit read pool size.
    pub fn open_with_pool_size(path: &Path, pool_size: usize) -> Result<Self, StorageError> {
        let writer = Connection::open(path).map_err(map_sqlite_err)?;
        apply_pragmas(&writer)?;
        migrations::run_migrations(&writer)?;

        let readers = ReadPool::open(path, pool_size, apply_read_pragmas)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers,
            read_via_writer: false,
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let writer = Connection::open_in_memory().map_err(map_sqlite_err)?;
        apply_pragmas(&writer)?;
        migrations::run_migrations(&writer)?;

        Ok(Self {
            writer: Mutex::new(writer),
            readers: ReadPool::empty(),
            read_via_writer: true,
        })
    }

    /// Execute a write operation on the serialized writer connection.
    pub fn with_writer<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        let guard = self.writer.lock().map_err(|_| StorageError::SqliteError {
            message: "write lock poisoned".to_string(),
        })?;
        f(&guard)
    }

    /// Execute a read-then-write operation inside one IMMEDIATE transaction.
    ///
    /// IMMEDIATE acquires the write lock up front, so a concurrent
    /// transaction can never interleave between the read and the write.
    /// The transaction rolls back if the closure errors.
    pub fn with_tx<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Transaction<'_>) -> Result<T, StorageError>,
    {
        let mut guard = self.writer.lock().map_err(|_| StorageError::SqliteError {
            message: "write lock poisoned".to_string(),
        })?;
        let tx = guard
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(map_sqlite_err)?;
        let result = f(&tx)?;
        tx.commit().map_err(map_sqlite_err)?;
        Ok(result)
    }

    /// Execute a read operation on a pooled read connection.
    pub fn with_reader<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&Connection) -> Result<T, StorageError>,
    {
        if self.read_via_writer {
            self.with_writer(f)
        } else {
            self.readers.with_conn(f)
        }
    }
}
