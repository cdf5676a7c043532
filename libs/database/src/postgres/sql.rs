//! Parameterized statement execution over any SeaORM connection or transaction.
//!
//! Every function checks a connection out of the pool for the duration of the call
//! only; the pool reclaims it on success and on error alike. Failures surface as
//! [`DatabaseError::Postgres`].

use sea_orm::{
    ConnectionTrait, DatabaseBackend, DbErr, FromQueryResult, Statement, TransactionSession,
    TransactionTrait, Value,
};
use tracing::{debug, warn};

use crate::common::{DatabaseError, DatabaseResult};

#[derive(Debug, FromQueryResult)]
struct ReturnedId {
    id: i64,
}

/// Build a PostgreSQL statement with `$n` placeholders bound to `values`.
pub fn statement(sql: impl Into<String>, values: impl IntoIterator<Item = Value>) -> Statement {
    Statement::from_sql_and_values(DatabaseBackend::Postgres, sql, values)
}

/// Run a query and map every row.
pub async fn fetch_all<T, C>(conn: &C, stmt: Statement) -> DatabaseResult<Vec<T>>
where
    T: FromQueryResult,
    C: ConnectionTrait,
{
    debug!(sql = %stmt.sql, "fetch_all");
    Ok(T::find_by_statement(stmt).all(conn).await?)
}

/// Run a query and map the first row, if any.
pub async fn fetch_optional<T, C>(conn: &C, stmt: Statement) -> DatabaseResult<Option<T>>
where
    T: FromQueryResult,
    C: ConnectionTrait,
{
    debug!(sql = %stmt.sql, "fetch_optional");
    Ok(T::find_by_statement(stmt).one(conn).await?)
}

/// Run an `INSERT ... RETURNING id` and return the generated key.
pub async fn insert_returning_id<C>(conn: &C, stmt: Statement) -> DatabaseResult<i64>
where
    C: ConnectionTrait,
{
    debug!(sql = %stmt.sql, "insert_returning_id");
    let row = ReturnedId::find_by_statement(stmt)
        .one(conn)
        .await?
        .ok_or(DbErr::RecordNotInserted)?;
    Ok(row.id)
}

/// Run an UPDATE/DELETE and return the number of affected rows.
pub async fn execute<C>(conn: &C, stmt: Statement) -> DatabaseResult<u64>
where
    C: ConnectionTrait,
{
    debug!(sql = %stmt.sql, "execute");
    Ok(conn.execute_raw(stmt).await?.rows_affected())
}

/// Run `statements` in order inside one transaction.
///
/// Commits when all succeed and returns the summed affected-row count. On the first
/// failure the transaction is rolled back before the error is returned.
pub async fn execute_in_transaction<C>(db: &C, statements: Vec<Statement>) -> DatabaseResult<u64>
where
    C: TransactionTrait,
{
    let txn = db.begin().await?;
    let mut affected = 0;

    for (index, stmt) in statements.into_iter().enumerate() {
        match txn.execute_raw(stmt).await {
            Ok(result) => affected += result.rows_affected(),
            Err(err) => {
                warn!(statement = index, error = %err, "Statement failed, rolling back");
                if let Err(rollback_err) = txn.rollback().await {
                    warn!(error = %rollback_err, "Rollback failed");
                }
                return Err(DatabaseError::Postgres(err));
            }
        }
    }

    txn.commit().await?;
    Ok(affected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{MockDatabase, MockExecResult};
    use std::collections::BTreeMap;

    #[derive(Debug, PartialEq, FromQueryResult)]
    struct Row {
        id: i64,
        name: String,
    }

    fn row(id: i64, name: &str) -> BTreeMap<&'static str, Value> {
        BTreeMap::from([("id", Value::from(id)), ("name", Value::from(name))])
    }

    fn exec(rows_affected: u64) -> MockExecResult {
        MockExecResult {
            last_insert_id: 0,
            rows_affected,
        }
    }

    #[tokio::test]
    async fn test_fetch_all_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![row(1, "Widget"), row(2, "Gadget")]])
            .into_connection();

        let rows: Vec<Row> = fetch_all(&db, statement("SELECT id, name FROM products", []))
            .await
            .unwrap();

        assert_eq!(
            rows,
            vec![
                Row { id: 1, name: "Widget".into() },
                Row { id: 2, name: "Gadget".into() },
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_optional_empty() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();

        let found: Option<Row> = fetch_optional(
            &db,
            statement("SELECT id, name FROM products WHERE id = $1", [Value::from(9i64)]),
        )
        .await
        .unwrap();

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_insert_returning_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![BTreeMap::from([("id", Value::from(42i64))])]])
            .into_connection();

        let id = insert_returning_id(
            &db,
            statement(
                "INSERT INTO products (name) VALUES ($1) RETURNING id",
                [Value::from("Widget")],
            ),
        )
        .await
        .unwrap();

        assert_eq!(id, 42);
    }

    #[tokio::test]
    async fn test_insert_without_returned_row_is_an_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
            .into_connection();

        let stmt = statement("INSERT INTO products DEFAULT VALUES RETURNING id", []);
        let err = insert_returning_id(&db, stmt).await.unwrap_err();

        assert!(matches!(err, DatabaseError::Postgres(DbErr::RecordNotInserted)));
    }

    #[tokio::test]
    async fn test_execute_returns_rows_affected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(3)])
            .into_connection();

        let stmt = statement("DELETE FROM products WHERE quantity = $1", [Value::from(0)]);
        let affected = execute(&db, stmt).await.unwrap();

        assert_eq!(affected, 3);
    }

    #[tokio::test]
    async fn test_execute_propagates_driver_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_errors([DbErr::Custom("deadlock detected".into())])
            .into_connection();

        let err = execute(&db, statement("DELETE FROM products", [])).await.unwrap_err();

        assert!(matches!(err, DatabaseError::Postgres(_)));
        assert!(err.to_string().contains("deadlock detected"));
    }

    #[tokio::test]
    async fn test_transaction_commits_and_sums_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(1), exec(2)])
            .into_connection();

        let affected = execute_in_transaction(
            &db,
            vec![
                statement("UPDATE products SET quantity = 0 WHERE id = $1", [Value::from(1i64)]),
                statement("DELETE FROM products WHERE quantity = 0", []),
            ],
        )
        .await
        .unwrap();

        assert_eq!(affected, 3);
    }

    #[tokio::test]
    async fn test_transaction_failure_returns_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_exec_results([exec(1)])
            .append_exec_errors([DbErr::Custom("check constraint violated".into())])
            .into_connection();

        let result = execute_in_transaction(
            &db,
            vec![
                statement("UPDATE products SET quantity = 5 WHERE id = $1", [Value::from(1i64)]),
                statement("UPDATE products SET price = -1 WHERE id = $1", [Value::from(1i64)]),
            ],
        )
        .await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("check constraint violated"));
    }
}
