//! Statement execution in list and single-row mode.
//!
//! Every function takes the request's connection explicitly and a fully
//! built [`QueryBuilder`], so bound parameters travel with the statement.
//! Driver failures propagate as [`DbError::Query`] without retries.

use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection};

use crate::error::DbError;
use crate::resource::Resource;

/// Run a statement returning zero or more rows, in database order.
///
/// # Errors
///
/// Returns [`DbError::Query`] if the statement fails or a row does not
/// decode into `T`.
pub async fn fetch_list<T>(
    conn: &mut SqliteConnection,
    mut query: QueryBuilder<'_, Sqlite>,
) -> Result<Vec<T>, DbError>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let rows = query.build_query_as::<T>().fetch_all(&mut *conn).await?;
    Ok(rows)
}

/// Run a statement expected to return one row.
///
/// `what` describes the lookup for the [`DbError::NotFound`] message.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row comes back and
/// [`DbError::Query`] if the statement fails.
pub async fn fetch_one<T>(
    conn: &mut SqliteConnection,
    mut query: QueryBuilder<'_, Sqlite>,
    what: &str,
) -> Result<T, DbError>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    query
        .build_query_as::<T>()
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| DbError::NotFound(what.to_owned()))
}

/// Run a `SELECT COUNT(*)` style statement and return its single value.
///
/// # Errors
///
/// Returns [`DbError::Query`] if the statement fails.
pub async fn fetch_count(
    conn: &mut SqliteConnection,
    mut query: QueryBuilder<'_, Sqlite>,
) -> Result<i64, DbError> {
    let count = query
        .build_query_scalar::<i64>()
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}

/// Look up one record of `R` by its key column.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row has that key.
pub async fn fetch_by_key<R: Resource>(
    conn: &mut SqliteConnection,
    key: &str,
) -> Result<R, DbError> {
    let mut query = QueryBuilder::<Sqlite>::new("SELECT * FROM ");
    query
        .push(R::TABLE)
        .push(" WHERE ")
        .push(R::KEY)
        .push(" = ")
        .push_bind(key.to_owned())
        .push(" ORDER BY ")
        .push(R::SORT)
        .push(" LIMIT 1");

    fetch_one(conn, query, &format!("{} {key}", R::TABLE)).await
}
