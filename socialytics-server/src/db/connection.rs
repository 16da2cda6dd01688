use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

use super::error::SchemaError;
use super::schema::{TableDef, INDEXES, SCHEMA, TABLES};

/// SQLite in-memory database identifier
const MEMORY_DB_PATH: &str = ":memory:";

pub type DbPool = Pool<SqliteConnectionManager>;
pub type DbConnection = PooledConnection<SqliteConnectionManager>;

/// Pool sizing for file-backed databases
#[derive(Debug, Clone)]
pub struct PoolOptions {
    pub max_size: u32,
    pub connection_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_size: 8,
            connection_timeout: Duration::from_secs(30),
        }
    }
}

/// Database wrapper with connection pooling support
#[derive(Clone)]
pub struct Database {
    pub pool: DbPool,
}

impl Database {
    /// Open a connection pool with default options
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        Self::open(path, PoolOptions::default())
    }

    /// Open a connection pool
    ///
    /// # Arguments
    /// * `path` - Database file path or ":memory:" for in-memory database
    /// * `options` - Pool size and checkout timeout
    ///
    /// An in-memory database lives inside a single connection, so its pool is
    /// always capped at one connection regardless of `options.max_size`.
    pub fn open<P: AsRef<Path>>(path: P, options: PoolOptions) -> Result<Self, SchemaError> {
        let (manager, in_memory) = Self::create_connection_manager(path);
        let max_size = if in_memory { 1 } else { options.max_size.max(1) };

        let pool = Pool::builder()
            .max_size(max_size)
            .connection_timeout(options.connection_timeout)
            .build(manager)?;

        Ok(Self { pool })
    }

    /// Create appropriate connection manager based on path
    fn create_connection_manager<P: AsRef<Path>>(path: P) -> (SqliteConnectionManager, bool) {
        let path_str = path.as_ref().to_string_lossy();
        let trimmed_path = path_str.trim();

        let (manager, in_memory) = if trimmed_path.eq_ignore_ascii_case(MEMORY_DB_PATH) {
            (SqliteConnectionManager::memory(), true)
        } else {
            (SqliteConnectionManager::file(path.as_ref()), false)
        };

        // Foreign key enforcement is per connection in SQLite
        let manager = manager.with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
        (manager, in_memory)
    }

    /// Create an in-memory database pool (useful for testing)
    pub fn in_memory() -> Result<Self, SchemaError> {
        Self::new(MEMORY_DB_PATH)
    }

    /// Ensure every table, column and index exists.
    ///
    /// Tables are only created when missing, so this runs on every startup.
    /// Existing tables must carry each declared column with its declared type;
    /// extra columns are left alone.
    pub fn ensure_schema(&self) -> Result<(), SchemaError> {
        let conn = self.pool.get()?;
        conn.execute_batch(SCHEMA)?;

        for table in TABLES {
            verify_table(&conn, table)?;
        }

        apply_indexes(&conn)?;
        tracing::debug!("Schema verified: {} tables, {} indexes", TABLES.len(), INDEXES.len());
        Ok(())
    }

    /// Create the secondary indexes, returning their names
    pub fn create_indexes(&self) -> Result<Vec<String>, SchemaError> {
        let conn = self.pool.get()?;
        apply_indexes(&conn)
    }

    /// Drop the secondary indexes (primary keys and unique constraints stay)
    pub fn drop_indexes(&self) -> Result<(), SchemaError> {
        let conn = self.pool.get()?;
        for (name, _) in INDEXES {
            conn.execute_batch(&format!("DROP INDEX IF EXISTS {}", name))?;
        }
        Ok(())
    }

    /// Names of user tables, sorted
    pub fn table_names(&self) -> Result<Vec<String>, SchemaError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
             ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    /// Names of explicitly created indexes, sorted
    pub fn index_names(&self) -> Result<Vec<String>, SchemaError> {
        let conn = self.pool.get()?;
        let mut stmt = conn.prepare(
            "SELECT name FROM sqlite_master
             WHERE type = 'index' AND name NOT LIKE 'sqlite_autoindex_%'
             ORDER BY name",
        )?;
        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(names)
    }

    /// Get a connection from the pool
    pub fn connection(&self) -> Result<DbConnection, r2d2::Error> {
        self.pool.get()
    }
}

fn apply_indexes(conn: &Connection) -> Result<Vec<String>, SchemaError> {
    for (_, ddl) in INDEXES {
        conn.execute_batch(ddl)?;
    }
    Ok(INDEXES.iter().map(|(name, _)| name.to_string()).collect())
}

fn verify_table(conn: &Connection, table: &TableDef) -> Result<(), SchemaError> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table.name))?;
    let columns = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, bool>(3)?,
            ))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    for expected in table.columns {
        let (_, found_type, not_null) = columns
            .iter()
            .find(|(name, _, _)| name.eq_ignore_ascii_case(expected.name))
            .ok_or_else(|| SchemaError::MissingColumn {
                table: table.name.to_string(),
                column: expected.name.to_string(),
            })?;

        if !found_type.trim().eq_ignore_ascii_case(expected.sql_type) {
            return Err(SchemaError::IncompatibleColumn {
                table: table.name.to_string(),
                column: expected.name.to_string(),
                expected: expected.sql_type.to_string(),
                found: found_type.clone(),
            });
        }

        if expected.not_null && !not_null {
            return Err(missing_constraint(table, format!("NOT NULL ({})", expected.name)));
        }
    }

    verify_unique(conn, table)?;
    verify_references(conn, table)?;
    verify_checks(conn, table)
}

fn missing_constraint(table: &TableDef, constraint: String) -> SchemaError {
    SchemaError::MissingConstraint {
        table: table.name.to_string(),
        constraint,
    }
}

/// Each listed column needs a unique index covering exactly that column
fn verify_unique(conn: &Connection, table: &TableDef) -> Result<(), SchemaError> {
    if table.unique.is_empty() {
        return Ok(());
    }

    let mut stmt = conn.prepare(&format!("PRAGMA index_list({})", table.name))?;
    let unique_indexes = stmt
        .query_map([], |row| Ok((row.get::<_, String>(1)?, row.get::<_, bool>(2)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut covered = Vec::new();
    for (index, unique) in unique_indexes {
        if !unique {
            continue;
        }
        let mut info = conn.prepare(&format!("PRAGMA index_info(\"{}\")", index))?;
        let columns = info
            .query_map([], |row| row.get::<_, Option<String>>(2))?
            .collect::<Result<Vec<_>, _>>()?;
        if let [Some(column)] = columns.as_slice() {
            covered.push(column.to_lowercase());
        }
    }

    for column in table.unique {
        if !covered.contains(&column.to_lowercase()) {
            return Err(missing_constraint(table, format!("UNIQUE ({})", column)));
        }
    }
    Ok(())
}

fn verify_references(conn: &Connection, table: &TableDef) -> Result<(), SchemaError> {
    if table.references.is_empty() {
        return Ok(());
    }

    let mut stmt = conn.prepare(&format!("PRAGMA foreign_key_list({})", table.name))?;
    let keys = stmt
        .query_map([], |row| Ok((row.get::<_, String>(2)?, row.get::<_, String>(3)?)))?
        .collect::<Result<Vec<_>, _>>()?;

    for (column, parent) in table.references {
        let found = keys.iter().any(|(key_parent, key_column)| {
            key_parent.eq_ignore_ascii_case(parent) && key_column.eq_ignore_ascii_case(column)
        });
        if !found {
            return Err(missing_constraint(
                table,
                format!("FOREIGN KEY ({}) REFERENCES {}", column, parent),
            ));
        }
    }
    Ok(())
}

/// SQLite exposes no pragma for CHECK clauses, so match the stored DDL
fn verify_checks(conn: &Connection, table: &TableDef) -> Result<(), SchemaError> {
    if table.checks.is_empty() {
        return Ok(());
    }

    let ddl: String = conn.query_row(
        "SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?",
        [table.name],
        |row| row.get(0),
    )?;
    let normalized: String = ddl
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();

    for check in table.checks {
        if !normalized.contains(check) {
            return Err(missing_constraint(table, check.to_uppercase()));
        }
    }
    Ok(())
}
