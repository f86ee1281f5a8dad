pub mod articles;
pub mod error;
pub mod models;
pub mod pool;

// Re-export commonly used types
pub use error::{DbError, DbResult};
pub use models::ArticleRecord;
pub use pool::{create_pool, run_migrations};
