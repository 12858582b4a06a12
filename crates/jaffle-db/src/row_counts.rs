//! Row-count summary across the monitored tables.

use jaffle_types::RowCount;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection};

use crate::error::DbError;
use crate::query;
use crate::resource::MONITORED_TABLES;

/// Build the `UNION ALL` statement counting every monitored table.
fn row_counts_sql() -> String {
    MONITORED_TABLES
        .iter()
        .map(|table| format!("SELECT '{table}' AS table_name, COUNT(*) AS row_count FROM {table}"))
        .collect::<Vec<_>>()
        .join(" UNION ALL ")
}

/// Count the rows of every monitored table in one round trip.
///
/// Returns one row per table in [`MONITORED_TABLES`] order.
///
/// # Errors
///
/// Returns [`DbError::Query`] if any table is missing or the statement
/// fails.
pub async fn row_counts(conn: &mut SqliteConnection) -> Result<Vec<RowCount>, DbError> {
    let select = QueryBuilder::<Sqlite>::new(row_counts_sql());
    query::fetch_list(conn, select).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_select_per_table() {
        let sql = row_counts_sql();
        assert_eq!(sql.matches("UNION ALL").count(), MONITORED_TABLES.len() - 1);
        assert!(sql.starts_with(
            "SELECT 'customers' AS table_name, COUNT(*) AS row_count FROM customers"
        ));
        assert!(sql.ends_with("FROM supplies"));
    }
}
