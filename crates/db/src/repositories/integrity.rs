//! Referential integrity helpers shared by the repositories.
//!
//! Deletes are driven by [`EntityKind::dependents`]: each relation pointing
//! at the record is resolved (cascade, clear, unlink) inside the caller's
//! transaction before the record itself is removed.

use futures::future::BoxFuture;
use moviedb_core::catalog::{EntityKind, OnDelete};
use moviedb_core::error::CoreError;
use moviedb_core::types::DbId;
use sqlx::SqliteConnection;

use crate::error::StoreResult;
use crate::DbPool;

/// Whether a row of `kind` with this id exists.
pub(crate) async fn exists(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    id: DbId,
) -> Result<bool, sqlx::Error> {
    let query = format!("SELECT COUNT(*) FROM {} WHERE id = $1", kind.table());
    let count: i64 = sqlx::query_scalar(&query)
        .bind(id)
        .fetch_one(&mut *conn)
        .await?;
    Ok(count > 0)
}

/// Delete one record and everything its relations require, atomically.
///
/// Fails with `NotFound` (and touches nothing) when the record is absent.
pub(crate) async fn delete_entity(pool: &DbPool, kind: EntityKind, id: DbId) -> StoreResult<()> {
    let mut tx = pool.begin().await?;

    if !exists(&mut tx, kind, id).await? {
        return Err(CoreError::not_found(kind, id).into());
    }

    let removed = delete_with_policies(&mut tx, kind, id).await?;
    tx.commit().await?;

    tracing::debug!(entity = kind.name(), id, removed, "Deleted record");
    Ok(())
}

/// Apply `kind`'s delete policies for `id`, then delete the row.
///
/// Returns the number of entity rows removed, cascaded ones included.
/// Boxed because a cascade recurses into the dependent kind.
fn delete_with_policies(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    id: DbId,
) -> BoxFuture<'_, Result<u64, sqlx::Error>> {
    Box::pin(async move {
        let mut removed = 0;

        for relation in kind.dependents() {
            match relation.on_delete {
                OnDelete::Cascade(dependent) => {
                    let query = format!(
                        "SELECT id FROM {} WHERE {} = $1",
                        relation.table, relation.column
                    );
                    let dependent_ids: Vec<DbId> = sqlx::query_scalar(&query)
                        .bind(id)
                        .fetch_all(&mut *conn)
                        .await?;
                    for dependent_id in dependent_ids {
                        removed += delete_with_policies(&mut *conn, dependent, dependent_id).await?;
                    }
                }
                OnDelete::SetNull => {
                    let query = format!(
                        "UPDATE {table} SET {column} = NULL WHERE {column} = $1",
                        table = relation.table,
                        column = relation.column
                    );
                    sqlx::query(&query).bind(id).execute(&mut *conn).await?;
                }
                OnDelete::Unlink => {
                    let query = format!(
                        "DELETE FROM {} WHERE {} = $1",
                        relation.table, relation.column
                    );
                    sqlx::query(&query).bind(id).execute(&mut *conn).await?;
                }
            }
        }

        let query = format!("DELETE FROM {} WHERE id = $1", kind.table());
        let result = sqlx::query(&query).bind(id).execute(&mut *conn).await?;
        Ok(removed + result.rows_affected())
    })
}
