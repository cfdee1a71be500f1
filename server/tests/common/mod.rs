#![allow(dead_code, unused_imports)]

pub mod memory_db;
pub mod test_database;

pub use memory_db::MemoryDatabase;
pub use test_database::TestDatabase;

/// Skip a database-backed test when no PostgreSQL server is configured
#[macro_export]
macro_rules! require_database {
    () => {
        if $crate::common::TestDatabase::admin_url().is_none() {
            eprintln!("Skipping test: TEST_DATABASE_URL not set");
            return Ok(());
        }
    };
}
