//! Shared helpers for store integration tests.

use moviedb_db::models::genre::CreateGenre;
use moviedb_db::models::oscar_award::CreateOscarAward;
use moviedb_db::{create_pool, run_migrations, DbPool};

/// Fresh in-memory database with all migrations applied.
pub async fn test_pool() -> DbPool {
    let pool = create_pool("sqlite::memory:")
        .await
        .expect("Failed to open in-memory database");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

#[allow(dead_code)]
pub fn new_genre(name: &str) -> CreateGenre {
    CreateGenre {
        name: Some(name.to_string()),
    }
}

#[allow(dead_code)]
pub fn new_award(category: &str, year: i32) -> CreateOscarAward {
    CreateOscarAward {
        category: Some(category.to_string()),
        year: Some(year),
    }
}
