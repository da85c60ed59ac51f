//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for a table definition.
//! Identifiers come from entity definitions only; values are always bound.

use crate::sql::{Filter, SqlValue};

/// Quote identifier for SQLite (safe: only from entity definitions).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Table name and column list, id column first.
#[derive(Clone, Copy, Debug)]
pub struct TableDef {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

impl TableDef {
    fn pk(&self) -> &'static str {
        self.columns[0]
    }

    fn column_list(&self) -> String {
        self.columns
            .iter()
            .map(|c| quoted(c))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    /// Appends ` WHERE a = ? AND b = ?` for the given filters; no-op when empty.
    fn push_where(&mut self, filters: &[Filter]) {
        if filters.is_empty() {
            return;
        }
        let conds: Vec<String> = filters
            .iter()
            .map(|f| format!("{} = ?", quoted(f.column)))
            .collect();
        self.sql.push_str(" WHERE ");
        self.sql.push_str(&conds.join(" AND "));
        self.params.extend(filters.iter().map(|f| f.value.clone()));
    }
}

/// SELECT rows matching all filters (all rows when `filters` is empty).
pub fn select_list(table: &TableDef, filters: &[Filter]) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT {} FROM {}", table.column_list(), quoted(table.name));
    q.push_where(filters);
    q
}

/// SELECT by primary key.
pub fn select_by_id(table: &TableDef, id: SqlValue) -> QueryBuf {
    select_list(
        table,
        &[Filter {
            column: table.pk(),
            value: id,
        }],
    )
}

/// INSERT all columns; `values` are in column order. Returns the stored row.
pub fn insert(table: &TableDef, values: Vec<SqlValue>) -> QueryBuf {
    let mut q = QueryBuf::new();
    let placeholders = vec!["?"; table.columns.len()].join(", ");
    q.sql = format!(
        "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
        quoted(table.name),
        table.column_list(),
        placeholders,
        table.column_list()
    );
    q.params = values;
    q
}

/// UPDATE every non-id column where the id matches and every `scope` filter matches.
/// `values` are in column order, id first.
pub fn update(table: &TableDef, values: Vec<SqlValue>, scope: &[Filter]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut values = values.into_iter();
    let id = values.next();
    let sets: Vec<String> = table.columns[1..]
        .iter()
        .map(|c| format!("{} = ?", quoted(c)))
        .collect();
    q.sql = format!("UPDATE {} SET {}", quoted(table.name), sets.join(", "));
    q.params.extend(values);
    let mut conds = Vec::with_capacity(scope.len() + 1);
    if let Some(id) = id {
        conds.push(Filter {
            column: table.pk(),
            value: id,
        });
    }
    conds.extend_from_slice(scope);
    q.push_where(&conds);
    q
}

/// DELETE rows matching all filters, returning the deleted rows.
pub fn delete_where(table: &TableDef, filters: &[Filter]) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("DELETE FROM {}", quoted(table.name));
    q.push_where(filters);
    q.sql.push_str(&format!(" RETURNING {}", table.column_list()));
    q
}
