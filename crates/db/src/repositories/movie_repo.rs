//! Repository for the `movies` table and its actor/genre links.

use moviedb_core::catalog::{EntityKind, MOVIE_ACTORS_TABLE, MOVIE_GENRES_TABLE};
use moviedb_core::error::CoreError;
use moviedb_core::types::DbId;
use moviedb_core::validation::{FieldViolation, MovieCandidate, Violations};
use sqlx::SqliteConnection;

use crate::error::StoreResult;
use crate::models::movie::{CreateMovie, Movie, MovieWithLinks, UpdateMovie};
use crate::repositories::integrity;
use crate::DbPool;

const COLUMNS: &str = "id, title, created, director_id, oscar_award_id, animated";

/// One of the two many-to-many link sets of a movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MovieLink {
    Actor,
    Genre,
}

impl MovieLink {
    fn table(self) -> &'static str {
        match self {
            MovieLink::Actor => MOVIE_ACTORS_TABLE,
            MovieLink::Genre => MOVIE_GENRES_TABLE,
        }
    }

    fn column(self) -> &'static str {
        match self {
            MovieLink::Actor => "actor_id",
            MovieLink::Genre => "genre_id",
        }
    }

    /// Payload field carrying this link set.
    fn field(self) -> &'static str {
        match self {
            MovieLink::Actor => "actor",
            MovieLink::Genre => "genre",
        }
    }

    fn target(self) -> EntityKind {
        match self {
            MovieLink::Actor => EntityKind::Actor,
            MovieLink::Genre => EntityKind::Genre,
        }
    }
}

/// Provides CRUD and link operations for movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Validate and insert a new movie together with its initial links.
    pub async fn create(pool: &DbPool, input: &CreateMovie) -> StoreResult<MovieWithLinks> {
        let mut tx = pool.begin().await?;

        let candidate = input.candidate();
        let mut violations = candidate.violations();
        violations.extend(Self::check_references(&mut tx, &candidate, None).await?);
        violations.into_result()?;

        let query = format!(
            "INSERT INTO movies (title, created, director_id, oscar_award_id, animated) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(&candidate.title)
            .bind(chrono::Utc::now())
            .bind(candidate.director)
            .bind(candidate.oscar_award)
            .bind(candidate.animated)
            .fetch_one(&mut *tx)
            .await?;

        Self::replace_links(&mut tx, movie.id, MovieLink::Actor, &candidate.actor).await?;
        Self::replace_links(&mut tx, movie.id, MovieLink::Genre, &candidate.genre).await?;

        tx.commit().await?;
        tracing::debug!(id = movie.id, title = %movie.title, director_id = movie.director_id, "Created movie");

        Ok(MovieWithLinks {
            movie,
            actor_ids: candidate.actor,
            genre_ids: candidate.genre,
        })
    }

    /// Find a movie with its links by ID.
    pub async fn find_by_id(
        pool: &DbPool,
        id: DbId,
    ) -> Result<Option<MovieWithLinks>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::fetch(&mut conn, id).await
    }

    /// Find a movie by ID, failing with `NotFound` when absent.
    pub async fn get(pool: &DbPool, id: DbId) -> StoreResult<MovieWithLinks> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::Movie, id).into())
    }

    /// List all movies ordered by title, with their links.
    pub async fn list(pool: &DbPool) -> Result<Vec<MovieWithLinks>, sqlx::Error> {
        let mut conn = pool.acquire().await?;

        let query = format!("SELECT {COLUMNS} FROM movies ORDER BY title, id");
        let movies = sqlx::query_as::<_, Movie>(&query)
            .fetch_all(&mut *conn)
            .await?;

        let mut result = Vec::with_capacity(movies.len());
        for movie in movies {
            let actor_ids = Self::link_ids(&mut conn, movie.id, MovieLink::Actor).await?;
            let genre_ids = Self::link_ids(&mut conn, movie.id, MovieLink::Genre).await?;
            result.push(MovieWithLinks {
                movie,
                actor_ids,
                genre_ids,
            });
        }

        Ok(result)
    }

    /// Number of stored movies.
    pub async fn count(pool: &DbPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM movies")
            .fetch_one(pool)
            .await
    }

    /// Merge `input` onto the stored movie, re-validate and save.
    ///
    /// Link sets present in `input` replace the stored ones; absent ones are
    /// left alone. `created` is never written here.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        input: &UpdateMovie,
    ) -> StoreResult<MovieWithLinks> {
        let mut tx = pool.begin().await?;

        let existing = Self::fetch(&mut tx, id)
            .await?
            .ok_or_else(|| CoreError::not_found(EntityKind::Movie, id))?;

        let candidate = input.candidate(&existing);
        let mut violations = input.null_violations();
        violations.extend(candidate.violations());
        violations.extend(Self::check_references(&mut tx, &candidate, Some(id)).await?);
        violations.into_result()?;

        let query = format!(
            "UPDATE movies SET title = $2, director_id = $3, oscar_award_id = $4, animated = $5 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(&candidate.title)
            .bind(candidate.director)
            .bind(candidate.oscar_award)
            .bind(candidate.animated)
            .fetch_one(&mut *tx)
            .await?;

        if input.actor_ids().is_some() {
            Self::replace_links(&mut tx, id, MovieLink::Actor, &candidate.actor).await?;
        }
        if input.genre_ids().is_some() {
            Self::replace_links(&mut tx, id, MovieLink::Genre, &candidate.genre).await?;
        }

        tx.commit().await?;

        Ok(MovieWithLinks {
            movie,
            actor_ids: candidate.actor,
            genre_ids: candidate.genre,
        })
    }

    /// Delete a movie and its links. Actors, genres, the director and the
    /// award are untouched.
    pub async fn delete(pool: &DbPool, id: DbId) -> StoreResult<()> {
        integrity::delete_entity(pool, EntityKind::Movie, id).await
    }

    // -----------------------------------------------------------------------
    // Links
    // -----------------------------------------------------------------------

    /// Link an actor to a movie. Idempotent.
    pub async fn add_actor(pool: &DbPool, movie_id: DbId, actor_id: DbId) -> StoreResult<()> {
        Self::add_link(pool, movie_id, MovieLink::Actor, actor_id).await
    }

    /// Link a genre to a movie. Idempotent.
    pub async fn add_genre(pool: &DbPool, movie_id: DbId, genre_id: DbId) -> StoreResult<()> {
        Self::add_link(pool, movie_id, MovieLink::Genre, genre_id).await
    }

    /// Unlink an actor from a movie. Returns `true` if a link was removed.
    pub async fn remove_actor(pool: &DbPool, movie_id: DbId, actor_id: DbId) -> StoreResult<bool> {
        Self::remove_link(pool, movie_id, MovieLink::Actor, actor_id).await
    }

    /// Unlink a genre from a movie. Returns `true` if a link was removed.
    pub async fn remove_genre(pool: &DbPool, movie_id: DbId, genre_id: DbId) -> StoreResult<bool> {
        Self::remove_link(pool, movie_id, MovieLink::Genre, genre_id).await
    }

    async fn add_link(
        pool: &DbPool,
        movie_id: DbId,
        link: MovieLink,
        target_id: DbId,
    ) -> StoreResult<()> {
        let mut tx = pool.begin().await?;

        if !integrity::exists(&mut tx, EntityKind::Movie, movie_id).await? {
            return Err(CoreError::not_found(EntityKind::Movie, movie_id).into());
        }
        if !integrity::exists(&mut tx, link.target(), target_id).await? {
            let mut violations = Violations::new();
            violations.push(FieldViolation::missing_reference(link.field(), target_id));
            return Err(violations.into());
        }

        let query = format!(
            "INSERT OR IGNORE INTO {} (movie_id, {}) VALUES ($1, $2)",
            link.table(),
            link.column()
        );
        sqlx::query(&query)
            .bind(movie_id)
            .bind(target_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn remove_link(
        pool: &DbPool,
        movie_id: DbId,
        link: MovieLink,
        target_id: DbId,
    ) -> StoreResult<bool> {
        let mut tx = pool.begin().await?;

        if !integrity::exists(&mut tx, EntityKind::Movie, movie_id).await? {
            return Err(CoreError::not_found(EntityKind::Movie, movie_id).into());
        }

        let query = format!(
            "DELETE FROM {} WHERE movie_id = $1 AND {} = $2",
            link.table(),
            link.column()
        );
        let result = sqlx::query(&query)
            .bind(movie_id)
            .bind(target_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn fetch(
        conn: &mut SqliteConnection,
        id: DbId,
    ) -> Result<Option<MovieWithLinks>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;

        match movie {
            Some(movie) => {
                let actor_ids = Self::link_ids(conn, id, MovieLink::Actor).await?;
                let genre_ids = Self::link_ids(conn, id, MovieLink::Genre).await?;
                Ok(Some(MovieWithLinks {
                    movie,
                    actor_ids,
                    genre_ids,
                }))
            }
            None => Ok(None),
        }
    }

    /// Linked ids in the order they were linked.
    async fn link_ids(
        conn: &mut SqliteConnection,
        movie_id: DbId,
        link: MovieLink,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        let query = format!(
            "SELECT {column} FROM {table} WHERE movie_id = $1 ORDER BY rowid",
            column = link.column(),
            table = link.table()
        );
        sqlx::query_scalar(&query)
            .bind(movie_id)
            .fetch_all(&mut *conn)
            .await
    }

    /// Replace a link set within an existing transaction.
    async fn replace_links(
        conn: &mut SqliteConnection,
        movie_id: DbId,
        link: MovieLink,
        target_ids: &[DbId],
    ) -> Result<(), sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE movie_id = $1", link.table());
        sqlx::query(&query)
            .bind(movie_id)
            .execute(&mut *conn)
            .await?;

        let query = format!(
            "INSERT INTO {} (movie_id, {}) VALUES ($1, $2)",
            link.table(),
            link.column()
        );
        for &target_id in target_ids {
            sqlx::query(&query)
                .bind(movie_id)
                .bind(target_id)
                .execute(&mut *conn)
                .await?;
        }

        Ok(())
    }

    /// Every referenced record must exist, and the award must not already
    /// belong to another movie.
    async fn check_references(
        conn: &mut SqliteConnection,
        candidate: &MovieCandidate,
        exclude_id: Option<DbId>,
    ) -> Result<Violations, sqlx::Error> {
        let mut violations = Violations::new();

        if let Some(director_id) = candidate.director {
            if !integrity::exists(conn, EntityKind::Director, director_id).await? {
                violations.push(FieldViolation::missing_reference("director", director_id));
            }
        }

        if let Some(award_id) = candidate.oscar_award {
            if !integrity::exists(conn, EntityKind::OscarAward, award_id).await? {
                violations.push(FieldViolation::missing_reference("oscar_award", award_id));
            } else {
                let held: i64 = sqlx::query_scalar(
                    "SELECT COUNT(*) FROM movies \
                     WHERE oscar_award_id = $1 AND ($2 IS NULL OR id != $2)",
                )
                .bind(award_id)
                .bind(exclude_id)
                .fetch_one(&mut *conn)
                .await?;
                if held > 0 {
                    violations.push(FieldViolation::duplicate("oscar_award", "movie"));
                }
            }
        }

        for (link, ids) in [
            (MovieLink::Actor, &candidate.actor),
            (MovieLink::Genre, &candidate.genre),
        ] {
            for &target_id in ids {
                if !integrity::exists(conn, link.target(), target_id).await? {
                    violations.push(FieldViolation::missing_reference(link.field(), target_id));
                }
            }
        }

        Ok(violations)
    }
}
