//! # Resource Queries
//!
//! SQL builders for the CRUD contract. Table and column names come from
//! static definitions or the catalog and are always quoted; values are
//! always bound. Writes bind the whole record as one JSONB parameter and
//! expand it with `jsonb_populate_record`, so Postgres coerces each value to
//! its column type.

use crate::db::{quote_ident, quote_literal, Statement};
use crate::rest_api::PageQuery;

use super::coerce::Record;
use super::definition::{Paging, ResourceDef, Stamp};

/// Alias of the target table in every statement
const ALIAS: &str = "t";

/// Alias of the expanded JSON record in writes
const RECORD: &str = "r";

fn qualified(alias: &str, column: &str) -> String {
    format!("{}.{}", alias, quote_ident(column))
}

/// Row projection as a single JSONB value.
///
/// Resources whose JSON names differ from their columns get an explicit
/// `jsonb_build_object`; the rest return the whole row.
pub fn projection(def: &ResourceDef) -> String {
    if !def.has_renamed_columns() {
        return format!("to_jsonb({})", ALIAS);
    }

    let mut pairs = vec![format!(
        "{}, {}",
        quote_literal(def.key.json),
        qualified(ALIAS, def.key.column)
    )];
    for field in def.fixed_fields().iter().chain(def.read_only) {
        pairs.push(format!(
            "{}, {}",
            quote_literal(field.json),
            qualified(ALIAS, field.column)
        ));
    }
    format!("jsonb_build_object({})", pairs.join(", "))
}

fn order_by(def: &ResourceDef) -> String {
    format!(
        " ORDER BY {} {}",
        qualified(ALIAS, def.key.column),
        def.order.sql()
    )
}

fn from_table(table: &str) -> String {
    format!(" FROM {} AS {}", quote_ident(table), ALIAS)
}

/// Every row in default order
pub fn select_all(def: &ResourceDef) -> Statement {
    let mut stmt = Statement::new(format!("SELECT {}", projection(def)));
    stmt.push_sql(&from_table(def.table));
    stmt.push_sql(&order_by(def));
    stmt
}

/// One row by key
pub fn select_by_key(def: &ResourceDef, key: i64) -> Statement {
    let mut stmt = Statement::new(format!("SELECT {}", projection(def)));
    stmt.push_sql(&from_table(def.table));
    let placeholder = stmt.param(key);
    stmt.push_sql(&format!(
        " WHERE {} = {}",
        qualified(ALIAS, def.key.column),
        placeholder
    ));
    stmt
}

/// Escape `LIKE` metacharacters so the term matches literally
pub fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

fn push_search(stmt: &mut Statement, paging: &Paging, search: Option<&str>) {
    let Some(term) = search else {
        return;
    };
    if paging.search_columns.is_empty() {
        return;
    }

    let placeholder = stmt.param(like_pattern(term));
    let conditions: Vec<String> = paging
        .search_columns
        .iter()
        .map(|column| format!("{}::text ILIKE {}", qualified(ALIAS, column), placeholder))
        .collect();
    stmt.push_sql(&format!(" WHERE ({})", conditions.join(" OR ")));
}

/// Number of rows matching the search term
pub fn count_matching(def: &ResourceDef, paging: &Paging, search: Option<&str>) -> Statement {
    let mut stmt = Statement::new("SELECT COUNT(*)");
    stmt.push_sql(&from_table(def.table));
    push_search(&mut stmt, paging, search);
    stmt
}

/// One page of rows matching the search term
pub fn select_page(def: &ResourceDef, paging: &Paging, query: &PageQuery) -> Statement {
    let mut stmt = Statement::new(format!("SELECT {}", projection(def)));
    stmt.push_sql(&from_table(def.table));
    push_search(&mut stmt, paging, query.search.as_deref());
    stmt.push_sql(&order_by(def));
    let limit = stmt.param(i64::from(query.page_size));
    let offset = stmt.param(query.offset());
    stmt.push_sql(&format!(" LIMIT {} OFFSET {}", limit, offset));
    stmt
}

/// Expression that expands the bound record into a row of `table`
fn populate(table: &str, placeholder: &str) -> String {
    format!(
        "jsonb_populate_record(NULL::{}, {}) AS {}",
        quote_ident(table),
        placeholder,
        RECORD
    )
}

/// `INSERT ... SELECT` from the bound record.
///
/// `guard` is an extra condition over the record (alias `r`); when it
/// fails nothing is inserted and nothing is returned.
pub fn insert_row(
    table: &str,
    record: &Record,
    stamps: &[Stamp],
    returning: &str,
    guard: Option<&str>,
) -> Statement {
    let mut columns: Vec<String> = record.columns().iter().map(|c| quote_ident(c)).collect();
    let mut values: Vec<String> = record
        .columns()
        .iter()
        .map(|c| qualified(RECORD, c))
        .collect();
    for stamp in stamps {
        columns.push(quote_ident(stamp.column));
        values.push(stamp.expr.to_string());
    }

    if columns.is_empty() && guard.is_none() {
        return Statement::new(format!(
            "INSERT INTO {} AS {} DEFAULT VALUES RETURNING {}",
            quote_ident(table),
            ALIAS,
            returning
        ));
    }

    let mut stmt = Statement::new(format!(
        "INSERT INTO {} AS {} ({}) SELECT {}",
        quote_ident(table),
        ALIAS,
        columns.join(", "),
        values.join(", ")
    ));
    let placeholder = stmt.param(record.to_json());
    stmt.push_sql(&format!(" FROM {}", populate(table, &placeholder)));
    if let Some(guard) = guard {
        stmt.push_sql(&format!(" WHERE {}", guard));
    }
    stmt.push_sql(&format!(" RETURNING {}", returning));
    stmt
}

/// Insert with a requisition number derived from the row's own key.
///
/// The key is drawn from the key column's sequence inside the statement, so
/// the number and the key always agree and concurrent creates never share
/// a number.
pub fn insert_numbered(
    def: &ResourceDef,
    number_column: &str,
    fiscal_year: &str,
    record: &Record,
) -> Statement {
    let table = quote_ident(def.table);
    let key = quote_ident(def.key.column);

    let mut columns = vec![key.clone(), quote_ident(number_column)];
    let mut values = vec![
        format!("seq.{}", key),
        format!("'IT/' || seq.{} || '/' || ", key),
    ];
    for column in record.columns() {
        columns.push(quote_ident(column));
        values.push(qualified(RECORD, column));
    }

    let mut stmt = Statement::new(format!(
        "WITH seq AS (SELECT nextval(pg_get_serial_sequence({}, {})) AS {}) ",
        quote_literal(def.table),
        quote_literal(def.key.column),
        key
    ));
    let record_param = stmt.param(record.to_json());
    let year_param = stmt.param(fiscal_year);
    values[1].push_str(&year_param);

    stmt.push_sql(&format!(
        "INSERT INTO {} AS {} ({}) SELECT {} FROM seq, {} RETURNING {}",
        table,
        ALIAS,
        columns.join(", "),
        values.join(", "),
        populate(def.table, &record_param),
        projection(def)
    ));
    stmt
}

/// `UPDATE ... FROM` the bound record, by key
pub fn update_row(
    table: &str,
    key_column: &str,
    key: i64,
    record: &Record,
    returning: &str,
) -> Statement {
    let assignments: Vec<String> = record
        .columns()
        .iter()
        .map(|c| format!("{} = {}", quote_ident(c), qualified(RECORD, c)))
        .collect();

    let mut stmt = Statement::new(format!(
        "UPDATE {} AS {} SET {}",
        quote_ident(table),
        ALIAS,
        assignments.join(", ")
    ));
    let record_param = stmt.param(record.to_json());
    let key_param = stmt.param(key);
    stmt.push_sql(&format!(
        " FROM {} WHERE {} = {} RETURNING {}",
        populate(table, &record_param),
        qualified(ALIAS, key_column),
        key_param,
        returning
    ));
    stmt
}

/// Delete by key
pub fn delete_row(table: &str, key_column: &str, key: i64) -> Statement {
    let mut stmt = Statement::new(format!("DELETE FROM {} AS {}", quote_ident(table), ALIAS));
    let placeholder = stmt.param(key);
    stmt.push_sql(&format!(
        " WHERE {} = {}",
        qualified(ALIAS, key_column),
        placeholder
    ));
    stmt
}

/// Largest key in the table, zero when empty
pub fn max_key(table: &str, key_column: &str) -> Statement {
    Statement::new(format!(
        "SELECT COALESCE(MAX({}), 0)::bigint{}",
        qualified(ALIAS, key_column),
        from_table(table)
    ))
}
