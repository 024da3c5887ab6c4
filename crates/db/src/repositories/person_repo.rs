//! Repository for the `actors` and `directors` tables.
//!
//! Both tables share one row shape, so every method takes the
//! [`PersonKind`] that selects the table. Ids and uniqueness are scoped to
//! that table: an actor and a director may share a name.

use moviedb_core::catalog::MOVIE_ACTORS_TABLE;
use moviedb_core::error::CoreError;
use moviedb_core::person::{full_name, PersonKind};
use moviedb_core::types::DbId;
use moviedb_core::validation::{FieldViolation, PersonCandidate, Violations};
use sqlx::SqliteConnection;

use crate::error::StoreResult;
use crate::models::person::{CreatePerson, Person, UpdatePerson};
use crate::repositories::integrity;
use crate::DbPool;

const COLUMNS: &str = "id, name, surname, created";

/// Provides CRUD operations for actors and directors.
pub struct PersonRepo;

impl PersonRepo {
    /// Validate and insert a new person, stamping `created` with the current time.
    pub async fn create(
        pool: &DbPool,
        kind: PersonKind,
        input: &CreatePerson,
    ) -> StoreResult<Person> {
        let mut tx = pool.begin().await?;

        let candidate = input.candidate();
        Self::check(&mut tx, kind, &candidate, None)
            .await?
            .into_result()?;

        let query = format!(
            "INSERT INTO {} (name, surname, created) VALUES ($1, $2, $3) RETURNING {COLUMNS}",
            kind.entity().table()
        );
        let person = sqlx::query_as::<_, Person>(&query)
            .bind(&candidate.name)
            .bind(&candidate.surname)
            .bind(chrono::Utc::now())
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::debug!(
            entity = kind.entity().name(),
            id = person.id,
            person = %full_name(&person),
            "Created person"
        );
        Ok(person)
    }

    pub async fn find_by_id(
        pool: &DbPool,
        kind: PersonKind,
        id: DbId,
    ) -> Result<Option<Person>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::fetch(&mut conn, kind, id).await
    }

    /// Find a person by ID, failing with `NotFound` when absent.
    pub async fn get(pool: &DbPool, kind: PersonKind, id: DbId) -> StoreResult<Person> {
        Self::find_by_id(pool, kind, id)
            .await?
            .ok_or_else(|| CoreError::not_found(kind.entity(), id).into())
    }

    /// List all people of a kind ordered by surname, then name.
    pub async fn list(pool: &DbPool, kind: PersonKind) -> Result<Vec<Person>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {} ORDER BY surname, name, id",
            kind.entity().table()
        );
        sqlx::query_as::<_, Person>(&query).fetch_all(pool).await
    }

    /// Merge `input` onto the stored person, re-validate and save.
    ///
    /// `created` is never written here.
    pub async fn update(
        pool: &DbPool,
        kind: PersonKind,
        id: DbId,
        input: &UpdatePerson,
    ) -> StoreResult<Person> {
        let mut tx = pool.begin().await?;

        let existing = Self::fetch(&mut tx, kind, id)
            .await?
            .ok_or_else(|| CoreError::not_found(kind.entity(), id))?;

        let candidate = input.candidate(&existing);
        let mut violations = input.null_violations();
        violations.extend(Self::check(&mut tx, kind, &candidate, Some(id)).await?);
        violations.into_result()?;

        let query = format!(
            "UPDATE {} SET name = $2, surname = $3 WHERE id = $1 RETURNING {COLUMNS}",
            kind.entity().table()
        );
        let person = sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .bind(&candidate.name)
            .bind(&candidate.surname)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(person)
    }

    /// Delete a person.
    ///
    /// Deleting a director also deletes every movie it directs; deleting an
    /// actor only drops its movie links.
    pub async fn delete(pool: &DbPool, kind: PersonKind, id: DbId) -> StoreResult<()> {
        integrity::delete_entity(pool, kind.entity(), id).await
    }

    /// IDs of the movies this person plays in or directs, ordered by title.
    pub async fn movie_ids(
        pool: &DbPool,
        kind: PersonKind,
        id: DbId,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let query = match kind {
            PersonKind::Actor => format!(
                "SELECT m.id FROM movies m \
                 JOIN {MOVIE_ACTORS_TABLE} ma ON ma.movie_id = m.id \
                 WHERE ma.actor_id = $1 \
                 ORDER BY m.title, m.id"
            ),
            PersonKind::Director => {
                "SELECT id FROM movies WHERE director_id = $1 ORDER BY title, id".to_string()
            }
        };
        sqlx::query_scalar(&query).bind(id).fetch_all(pool).await
    }

    async fn fetch(
        conn: &mut SqliteConnection,
        kind: PersonKind,
        id: DbId,
    ) -> Result<Option<Person>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM {} WHERE id = $1",
            kind.entity().table()
        );
        sqlx::query_as::<_, Person>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Field checks plus (name, surname) uniqueness within the kind's table.
    async fn check(
        conn: &mut SqliteConnection,
        kind: PersonKind,
        candidate: &PersonCandidate,
        exclude_id: Option<DbId>,
    ) -> Result<Violations, sqlx::Error> {
        let mut violations = candidate.violations();
        if !violations.is_empty() {
            return Ok(violations);
        }

        let query = format!(
            "SELECT COUNT(*) FROM {} \
             WHERE name = $1 AND surname = $2 AND ($3 IS NULL OR id != $3)",
            kind.entity().table()
        );
        let taken: i64 = sqlx::query_scalar(&query)
            .bind(&candidate.name)
            .bind(&candidate.surname)
            .bind(exclude_id)
            .fetch_one(&mut *conn)
            .await?;
        if taken > 0 {
            violations.push(FieldViolation::duplicate_set(&["name", "surname"]));
        }

        Ok(violations)
    }
}
