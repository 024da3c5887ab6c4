//! Repository for the `oscar_awards` table.

use moviedb_core::catalog::EntityKind;
use moviedb_core::error::CoreError;
use moviedb_core::oscar::OscarCategory;
use moviedb_core::types::DbId;
use moviedb_core::validation::{FieldViolation, OscarAwardCandidate, Violations};
use sqlx::SqliteConnection;

use crate::error::StoreResult;
use crate::models::oscar_award::{CreateOscarAward, OscarAward, UpdateOscarAward};
use crate::repositories::integrity;
use crate::DbPool;

const COLUMNS: &str = "id, category, year";

/// Provides CRUD operations for oscar awards.
pub struct OscarAwardRepo;

impl OscarAwardRepo {
    /// Validate and insert a new award, returning the created row.
    pub async fn create(pool: &DbPool, input: &CreateOscarAward) -> StoreResult<OscarAward> {
        let mut tx = pool.begin().await?;

        let candidate = input.candidate();
        let (category, year) = Self::check(&mut tx, &candidate, Violations::new(), None).await?;

        let query = format!(
            "INSERT INTO oscar_awards (category, year) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        let award = sqlx::query_as::<_, OscarAward>(&query)
            .bind(category.as_str())
            .bind(year)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(id = award.id, category = %award.category, year = award.year, "Created oscar award");
        Ok(award)
    }

    pub async fn find_by_id(pool: &DbPool, id: DbId) -> Result<Option<OscarAward>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM oscar_awards WHERE id = $1");
        sqlx::query_as::<_, OscarAward>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an award by its ID, failing with `NotFound` when absent.
    pub async fn get(pool: &DbPool, id: DbId) -> StoreResult<OscarAward> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::OscarAward, id).into())
    }

    /// List all awards in creation order.
    pub async fn list(pool: &DbPool) -> Result<Vec<OscarAward>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM oscar_awards ORDER BY id");
        sqlx::query_as::<_, OscarAward>(&query).fetch_all(pool).await
    }

    /// Merge `input` onto the stored award, re-validate and save.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateOscarAward,
    ) -> StoreResult<OscarAward> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM oscar_awards WHERE id = $1");
        let existing = sqlx::query_as::<_, OscarAward>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::OscarAward, id))?;

        let candidate = input.candidate(&existing);
        let (category, year) =
            Self::check(&mut tx, &candidate, input.null_violations(), Some(id)).await?;

        let query = format!(
            "UPDATE oscar_awards SET category = $2, year = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let award = sqlx::query_as::<_, OscarAward>(&query)
            .bind(id)
            .bind(category.as_str())
            .bind(year)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(award)
    }

    /// Delete an award. A movie holding it keeps existing with no award.
    pub async fn delete(pool: &DbPool, id: DbId) -> StoreResult<()> {
        integrity::delete_entity(pool, EntityKind::OscarAward, id).await
    }

    /// Validate the candidate, including (category, year) uniqueness among
    /// the other awards, and hand back the parsed values. `violations` carries
    /// violations already found in the payload.
    async fn check(
        conn: &mut SqliteConnection,
        candidate: &OscarAwardCandidate,
        mut violations: Violations,
        exclude_id: Option<DbId>,
    ) -> StoreResult<(OscarCategory, i32)> {
        violations.extend(candidate.violations());
        let (category, year) = match (candidate.category(), candidate.year) {
            (Some(category), Some(year)) if violations.is_empty() => (category, year),
            _ => return Err(violations.into()),
        };

        let taken: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM oscar_awards \
             WHERE category = $1 AND year = $2 AND ($3 IS NULL OR id != $3)",
        )
        .bind(category.as_str())
        .bind(year)
        .bind(exclude_id)
        .fetch_one(&mut *conn)
        .await?;

        if taken > 0 {
            violations.push(FieldViolation::duplicate_set(&["category", "year"]));
            return Err(violations.into());
        }

        Ok((category, year))
    }
}
