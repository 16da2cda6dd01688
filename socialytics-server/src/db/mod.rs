pub mod connection;
pub mod error;
pub mod fixture;
pub mod performance;
pub mod repositories;
pub mod schema;

mod rows;

pub use connection::{Database, DbConnection, DbPool, PoolOptions};
pub use error::{BenchmarkError, QueryError, SchemaError, StoreError};
