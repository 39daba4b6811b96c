use chrono::NaiveDate;
use sqlx::mysql::{MySqlQueryResult, MySqlRow};
use sqlx::{FromRow, MySqlPool};

use crate::model::RecordCategory;

/// ===============================
/// SQL bindable value enum
/// ===============================
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    String(String),
    I64(i64),
    U64(u64),
    F64(f64),
    Date(NaiveDate),
}

/// ===============================
/// SQL statement container
/// ===============================
#[derive(Debug)]
pub struct SqlStatement {
    pub sql: String,
    pub values: Vec<SqlValue>,
}

/// Inclusive `entry_date` bounds; either side may be open.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Table and column names come only from `RecordCategory`, never from the
/// request; every value is bound.
pub fn build_select_sql(category: RecordCategory, range: DateRange) -> SqlStatement {
    let mut conditions = Vec::new();
    let mut values = Vec::new();

    if let Some(from) = range.from {
        conditions.push("entry_date >= ?");
        values.push(SqlValue::Date(from));
    }
    if let Some(to) = range.to {
        conditions.push("entry_date <= ?");
        values.push(SqlValue::Date(to));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    SqlStatement {
        sql: format!(
            "SELECT id, {} FROM {}{} ORDER BY id",
            category.columns().join(", "),
            category.table(),
            where_clause
        ),
        values,
    }
}

pub fn build_select_one_sql(category: RecordCategory, id: u64) -> SqlStatement {
    SqlStatement {
        sql: format!(
            "SELECT id, {} FROM {} WHERE id = ?",
            category.columns().join(", "),
            category.table()
        ),
        values: vec![SqlValue::U64(id)],
    }
}

pub fn build_insert_sql(category: RecordCategory, values: Vec<SqlValue>) -> SqlStatement {
    let columns = category.columns();
    let placeholders = vec!["?"; columns.len()].join(", ");

    SqlStatement {
        sql: format!(
            "INSERT INTO {} ({}) VALUES ({})",
            category.table(),
            columns.join(", "),
            placeholders
        ),
        values,
    }
}

/// Full-row overwrite: every writable column is set.
pub fn build_update_sql(category: RecordCategory, mut values: Vec<SqlValue>, id: u64) -> SqlStatement {
    let set_clause = category
        .columns()
        .iter()
        .map(|c| format!("{} = ?", c))
        .collect::<Vec<_>>()
        .join(", ");

    // WHERE id = ?
    values.push(SqlValue::U64(id));

    SqlStatement {
        sql: format!("UPDATE {} SET {} WHERE id = ?", category.table(), set_clause),
        values,
    }
}

pub fn build_delete_sql(category: RecordCategory, id: u64) -> SqlStatement {
    SqlStatement {
        sql: format!("DELETE FROM {} WHERE id = ?", category.table()),
        values: vec![SqlValue::U64(id)],
    }
}

pub fn build_count_by_id_sql(category: RecordCategory, id: u64) -> SqlStatement {
    SqlStatement {
        sql: format!("SELECT COUNT(*) FROM {} WHERE id = ?", category.table()),
        values: vec![SqlValue::U64(id)],
    }
}

macro_rules! bind_values {
    ($query:expr, $values:expr) => {{
        let mut query = $query;
        for value in $values {
            query = match value {
                SqlValue::String(v) => query.bind(v),
                SqlValue::I64(v) => query.bind(v),
                SqlValue::U64(v) => query.bind(v),
                SqlValue::F64(v) => query.bind(v),
                SqlValue::Date(v) => query.bind(v),
            };
        }
        query
    }};
}

/// ===============================
/// Execute a write statement
/// ===============================
pub async fn execute(pool: &MySqlPool, statement: SqlStatement) -> Result<MySqlQueryResult, sqlx::Error> {
    bind_values!(sqlx::query(&statement.sql), statement.values)
        .execute(pool)
        .await
}

/// ===============================
/// Fetch typed rows
/// ===============================
pub async fn fetch_all<T>(pool: &MySqlPool, statement: SqlStatement) -> Result<Vec<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, MySqlRow> + Send + Unpin,
{
    bind_values!(sqlx::query_as::<_, T>(&statement.sql), statement.values)
        .fetch_all(pool)
        .await
}

pub async fn fetch_count(pool: &MySqlPool, statement: SqlStatement) -> Result<i64, sqlx::Error> {
    bind_values!(sqlx::query_scalar::<_, i64>(&statement.sql), statement.values)
        .fetch_one(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn select_without_range_has_no_where_clause() {
        let stmt = build_select_sql(RecordCategory::Salaries, DateRange::default());
        assert_eq!(
            stmt.sql,
            "SELECT id, employee_id, employee_name, salary, entry_date FROM salaries ORDER BY id"
        );
        assert!(stmt.values.is_empty());
    }

    #[test]
    fn select_with_inclusive_range() {
        let range = DateRange {
            from: Some(date(2024, 1, 1)),
            to: Some(date(2024, 3, 31)),
        };
        let stmt = build_select_sql(RecordCategory::LtcRecords, range);

        assert!(stmt.sql.ends_with("WHERE entry_date >= ? AND entry_date <= ? ORDER BY id"));
        assert_eq!(
            stmt.values,
            vec![SqlValue::Date(date(2024, 1, 1)), SqlValue::Date(date(2024, 3, 31))]
        );
    }

    #[test]
    fn select_with_open_lower_bound() {
        let range = DateRange {
            from: None,
            to: Some(date(2024, 3, 31)),
        };
        let stmt = build_select_sql(RecordCategory::GemPurchases, range);
        assert!(stmt.sql.contains("FROM gem_purchases WHERE entry_date <= ?"));
        assert_eq!(stmt.values.len(), 1);
    }

    #[test]
    fn insert_has_one_placeholder_per_column() {
        let stmt = build_insert_sql(RecordCategory::MedicalClaims, vec![]);
        assert_eq!(
            stmt.sql,
            "INSERT INTO medical_claims (claim_name, claim_type, amount, entry_date) VALUES (?, ?, ?, ?)"
        );
    }

    #[test]
    fn update_sets_every_column_and_binds_id_last() {
        let values = vec![
            SqlValue::String("E1".into()),
            SqlValue::String("Ravi".into()),
            SqlValue::F64(10.0),
            SqlValue::Date(date(2024, 2, 2)),
        ];
        let stmt = build_update_sql(RecordCategory::LtcRecords, values, 9);

        assert_eq!(
            stmt.sql,
            "UPDATE ltc_records SET employee_id = ?, employee_name = ?, amount = ?, entry_date = ? WHERE id = ?"
        );
        assert_eq!(stmt.values.last(), Some(&SqlValue::U64(9)));
    }

    #[test]
    fn delete_targets_single_id() {
        let stmt = build_delete_sql(RecordCategory::Salaries, 3);
        assert_eq!(stmt.sql, "DELETE FROM salaries WHERE id = ?");
        assert_eq!(stmt.values, vec![SqlValue::U64(3)]);
    }
}
