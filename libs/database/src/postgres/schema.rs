use sea_orm::{ConnectionTrait, FromQueryResult, TransactionTrait, Value};
use tracing::{info, warn};

use super::sql;
use crate::common::{DatabaseError, DatabaseResult};

#[derive(Debug, FromQueryResult)]
struct TableName {
    table_name: String,
}

/// Split a plain SQL script into statements.
///
/// `--` line comments are dropped. Dollar-quoted bodies are not understood, so the
/// script must not contain functions or `DO` blocks.
pub fn split_statements(script: &str) -> Vec<String> {
    let without_comments: String = script
        .lines()
        .map(|line| match line.find("--") {
            Some(pos) => &line[..pos],
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n");

    without_comments
        .split(';')
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Apply an idempotent DDL script in a single transaction.
pub async fn apply_schema<C>(db: &C, script: &str) -> DatabaseResult<()>
where
    C: TransactionTrait,
{
    let statements: Vec<_> = split_statements(script)
        .into_iter()
        .map(|stmt| sql::statement(stmt, []))
        .collect();

    if statements.is_empty() {
        return Err(DatabaseError::SchemaError("schema script is empty".into()));
    }

    let count = statements.len();
    sql::execute_in_transaction(db, statements).await?;
    info!(statements = count, "Schema applied");
    Ok(())
}

/// Names from `expected` that are absent from the current schema, in input order.
pub async fn missing_tables<C>(db: &C, expected: &[&str]) -> DatabaseResult<Vec<String>>
where
    C: ConnectionTrait,
{
    if expected.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = (1..=expected.len())
        .map(|i| format!("${i}"))
        .collect::<Vec<_>>()
        .join(", ");
    let stmt = sql::statement(
        format!(
            "SELECT table_name::text AS table_name FROM information_schema.tables \
             WHERE table_schema = current_schema() AND table_name IN ({placeholders})"
        ),
        expected.iter().map(|name| Value::from(*name)),
    );

    let present: Vec<TableName> = sql::fetch_all(db, stmt).await?;
    let missing = expected
        .iter()
        .filter(|name| !present.iter().any(|t| t.table_name == **name))
        .map(|name| name.to_string())
        .collect::<Vec<_>>();

    for table in &missing {
        warn!(table = %table, "Expected table is missing");
    }
    Ok(missing)
}
