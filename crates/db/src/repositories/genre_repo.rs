//! Repository for the `genres` table.

use moviedb_core::catalog::{EntityKind, MOVIE_GENRES_TABLE};
use moviedb_core::error::CoreError;
use moviedb_core::types::DbId;
use moviedb_core::validation::{FieldViolation, GenreCandidate, Violations};
use sqlx::SqliteConnection;

use crate::error::StoreResult;
use crate::models::genre::{CreateGenre, Genre, UpdateGenre};
use crate::repositories::integrity;
use crate::DbPool;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name";

/// Provides CRUD operations for genres.
pub struct GenreRepo;

impl GenreRepo {
    /// Validate and insert a new genre, returning the created row.
    pub async fn create(pool: &DbPool, input: &CreateGenre) -> StoreResult<Genre> {
        let mut tx = pool.begin().await?;

        let candidate = input.candidate();
        Self::check(&mut tx, &candidate, None).await?.into_result()?;

        let query = format!("INSERT INTO genres (name) VALUES ($1) RETURNING {COLUMNS}");
        let genre = sqlx::query_as::<_, Genre>(&query)
            .bind(&candidate.name)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(id = genre.id, name = %genre.name, "Created genre");
        Ok(genre)
    }

    /// Find a genre by its ID.
    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<Genre>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM genres WHERE id = $1");
        sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a genre by its ID, failing with `NotFound` when absent.
    pub async fn get(pool: &DbPool, id: DbId) -> StoreResult<Genre> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::Genre, id).into())
    }

    /// List all genres in creation order.
    pub async fn list(pool: &DbPool) -> Result<Vec<Genre>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM genres ORDER BY id");
        sqlx::query_as::<_, Genre>(&query).fetch_all(pool).await
    }

    /// Merge `input` onto the stored genre, re-validate and save.
    pub async fn update(pool: &DbPool, id: DbId, input: &UpdateGenre) -> StoreResult<Genre> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM genres WHERE id = $1");
        let existing = sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::Genre, id))?;

        let candidate = input.candidate(&existing);
        let mut violations = input.null_violations();
        violations.extend(Self::check(&mut tx, &candidate, Some(id)).await?);
        violations.into_result()?;

        let query = format!("UPDATE genres SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        let genre = sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .bind(&candidate.name)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(genre)
    }

    /// Delete a genre. Movies keep existing; only their links to it go.
    pub async fn delete(pool: &DbPool, id: DbId) -> StoreResult<()> {
        integrity::delete_entity(pool, EntityKind::Genre, id).await
    }

    /// IDs of the movies tagged with this genre, ordered by title.
    pub async fn movie_ids(pool: &DbPool, id: DbId) -> Result<Vec<DbId>, sqlx::Error> {
        let query = format!(
            "SELECT m.id FROM movies m \
             JOIN {MOVIE_GENRES_TABLE} mg ON mg.movie_id = m.id \
             WHERE mg.genre_id = $1 \
             ORDER BY m.title, m.id"
        );
        sqlx::query_scalar(&query).bind(id).fetch_all(pool).await
    }

    /// Field checks plus name uniqueness among the other genres.
    async fn check(
        conn: &mut SqliteConnection,
        candidate: &GenreCandidate,
        exclude_id: Option<DbId>,
    ) -> Result<Violations, sqlx::Error> {
        let mut violations = candidate.violations();
        if !violations.is_empty() {
            return Ok(violations);
        }

        let taken: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM genres WHERE name = $1 AND ($2 IS NULL OR id != $2)",
        )
        .bind(&candidate.name)
        .bind(exclude_id)
        .fetch_one(&mut *conn)
        .await?;
        if taken > 0 {
            violations.push(FieldViolation::duplicate("name", "genre"));
        }

        Ok(violations)
    }
}
