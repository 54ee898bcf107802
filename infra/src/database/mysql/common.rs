//! Row decoding and query building helpers shared by the MySQL repositories.

use std::str::FromStr;

use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};
use uuid::Uuid;

use dc_core::errors::DomainError;
use dc_shared::PageQuery;

/// Read a typed column, mapping decode failures to an internal error
pub(crate) fn column<'r, T>(row: &'r MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, MySql> + sqlx::Type<MySql>,
{
    row.try_get(name).map_err(|e| DomainError::Internal {
        message: format!("Failed to get {}: {}", name, e),
    })
}

/// Read a `CHAR(36)` column as a UUID
pub(crate) fn uuid_column(row: &MySqlRow, name: &str) -> Result<Uuid, DomainError> {
    let raw: String = column(row, name)?;
    Uuid::parse_str(&raw).map_err(|e| DomainError::Internal {
        message: format!("Invalid UUID in {}: {}", name, e),
    })
}

pub(crate) fn opt_uuid_column(row: &MySqlRow, name: &str) -> Result<Option<Uuid>, DomainError> {
    let raw: Option<String> = column(row, name)?;
    raw.map(|v| {
        Uuid::parse_str(&v).map_err(|e| DomainError::Internal {
            message: format!("Invalid UUID in {}: {}", name, e),
        })
    })
    .transpose()
}

/// Read a status-like column through its `FromStr` implementation
pub(crate) fn enum_column<T>(row: &MySqlRow, name: &str) -> Result<T, DomainError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw: String = column(row, name)?;
    raw.parse().map_err(|e: T::Err| DomainError::Internal {
        message: format!("Invalid value in {}: {}", name, e),
    })
}

/// Failed read query
pub(crate) fn query_error(e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "Database query failed");
    DomainError::Internal {
        message: format!("Database query failed: {}", e),
    }
}

/// Failed write; unique key violations surface as conflicts
pub(crate) fn write_error(e: sqlx::Error, conflict_message: &str) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return DomainError::conflict(conflict_message);
        }
    }
    query_error(e)
}

/// `%term%` for a case-insensitive `LIKE`
pub(crate) fn like_pattern(term: &str) -> String {
    format!("%{}%", term.to_lowercase())
}

/// Append `ORDER BY`, `LIMIT` and `OFFSET` for a list query
///
/// # Arguments
/// * `sortable` - Whitelisted columns; anything else sorts by `created_at`
/// * `alias` - Table alias prefixed to the sort column, empty for none
pub(crate) fn push_page(
    builder: &mut QueryBuilder<'_, MySql>,
    query: &PageQuery,
    sortable: &[&str],
    alias: &str,
) {
    let column = query.sort_column(sortable);
    builder.push(" ORDER BY ");
    if !alias.is_empty() {
        builder.push(alias).push(".");
    }
    builder
        .push(column)
        .push(" ")
        .push(query.order.as_sql())
        .push(" LIMIT ")
        .push_bind(query.limit_i64())
        .push(" OFFSET ")
        .push_bind(query.offset_i64());
}

/// Run a `SELECT COUNT(*) AS total ...` builder
pub(crate) async fn fetch_total(
    builder: &mut QueryBuilder<'_, MySql>,
    pool: &MySqlPool,
) -> Result<u64, DomainError> {
    let row = builder
        .build()
        .fetch_one(pool)
        .await
        .map_err(query_error)?;
    let total: i64 = column(&row, "total")?;
    Ok(total.max(0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dc_shared::SortOrder;

    #[test]
    fn test_like_pattern_lowercases() {
        assert_eq!(like_pattern("Budi"), "%budi%");
    }

    #[test]
    fn test_push_page_uses_whitelisted_column() {
        let mut builder = QueryBuilder::<MySql>::new("SELECT * FROM hospitals");
        let query = PageQuery {
            sort: "name".to_string(),
            order: SortOrder::Asc,
            ..Default::default()
        };
        push_page(&mut builder, &query, &["created_at", "name"], "h");
        assert_eq!(
            builder.sql(),
            "SELECT * FROM hospitals ORDER BY h.name ASC LIMIT ? OFFSET ?"
        );
    }

    #[test]
    fn test_push_page_rejects_unknown_column() {
        let mut builder = QueryBuilder::<MySql>::new("SELECT * FROM users");
        let query = PageQuery {
            sort: "password_hash".to_string(),
            ..Default::default()
        };
        push_page(&mut builder, &query, &["created_at", "name"], "");
        assert_eq!(
            builder.sql(),
            "SELECT * FROM users ORDER BY created_at DESC LIMIT ? OFFSET ?"
        );
    }
}
