use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row};

use super::model::{COLUMNS, Dataset, Month, SalesRecord};
use crate::error::DataUnavailable;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load every row of `relation` from the SQLite store at `path`.
///
/// The store is opened read-only, so a missing file fails instead of
/// creating an empty database. The connection is dropped before returning,
/// whether the load succeeds or not.
pub fn load(path: &Path, relation: &str) -> Result<Dataset, DataUnavailable> {
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .map_err(|source| DataUnavailable::Open {
        path: path.display().to_string(),
        source,
    })?;

    let dataset = read_relation(&conn, relation)?;

    log::info!(
        "Loaded {} rows from '{}' ({} regions, {} categories, {} years)",
        dataset.len(),
        relation,
        dataset.regions().len(),
        dataset.categories().len(),
        dataset.years().len(),
    );
    Ok(dataset)
}

/// Run the select-all query on an open connection and map every row.
pub fn read_relation(conn: &Connection, relation: &str) -> Result<Dataset, DataUnavailable> {
    let relation_err = |source| DataUnavailable::Relation {
        relation: relation.to_string(),
        source,
    };

    let sql = format!("SELECT * FROM {}", quote_identifier(relation));
    let mut stmt = conn.prepare(&sql).map_err(relation_err)?;

    let mut indices = [0usize; COLUMNS.len()];
    for (slot, name) in indices.iter_mut().zip(COLUMNS) {
        *slot = stmt
            .column_index(name)
            .map_err(|_| DataUnavailable::MissingColumn {
                relation: relation.to_string(),
                column: name.to_string(),
            })?;
    }

    let mut rows = stmt.query([]).map_err(relation_err)?;
    let mut records = Vec::new();
    while let Some(row) = rows.next().map_err(relation_err)? {
        records.push(map_row(row, records.len(), &indices)?);
    }

    Ok(Dataset::new(records))
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

/// Column position lookup in [`COLUMNS`] order.
fn map_row(row: &Row<'_>, row_no: usize, idx: &[usize; 9]) -> Result<SalesRecord, DataUnavailable> {
    let cell = Cell { row, row_no };
    Ok(SalesRecord {
        region: cell.text(idx[0], COLUMNS[0])?,
        category: cell.text(idx[1], COLUMNS[1])?,
        sub_category: cell.text(idx[2], COLUMNS[2])?,
        product_name: cell.text(idx[3], COLUMNS[3])?,
        year: cell.year(idx[4], COLUMNS[4])?,
        month: cell.month(idx[5], COLUMNS[5])?,
        sales: cell.real(idx[6], COLUMNS[6])?,
        profit: cell.real(idx[7], COLUMNS[7])?,
        profit_margin: cell.real(idx[8], COLUMNS[8])?,
    })
}

struct Cell<'r, 's> {
    row: &'r Row<'s>,
    row_no: usize,
}

impl Cell<'_, '_> {
    fn malformed(&self, column: &str, detail: impl Into<String>) -> DataUnavailable {
        DataUnavailable::MalformedValue {
            row: self.row_no,
            column: column.to_string(),
            detail: detail.into(),
        }
    }

    fn raw(&self, idx: usize, column: &str) -> Result<ValueRef<'_>, DataUnavailable> {
        self.row
            .get_ref(idx)
            .map_err(|e| self.malformed(column, e.to_string()))
    }

    fn text(&self, idx: usize, column: &str) -> Result<String, DataUnavailable> {
        match self.raw(idx, column)? {
            ValueRef::Text(bytes) => std::str::from_utf8(bytes)
                .map(str::to_string)
                .map_err(|e| self.malformed(column, format!("invalid UTF-8: {e}"))),
            ValueRef::Integer(i) => Ok(i.to_string()),
            ValueRef::Real(f) => Ok(f.to_string()),
            ValueRef::Null => Err(self.malformed(column, "NULL where text is required")),
            ValueRef::Blob(_) => Err(self.malformed(column, "BLOB where text is required")),
        }
    }

    fn real(&self, idx: usize, column: &str) -> Result<f64, DataUnavailable> {
        let value = match self.raw(idx, column)? {
            ValueRef::Real(f) => f,
            ValueRef::Integer(i) => i as f64,
            ValueRef::Text(bytes) => {
                let s = String::from_utf8_lossy(bytes);
                s.trim()
                    .parse::<f64>()
                    .map_err(|_| self.malformed(column, format!("'{s}' is not a number")))?
            }
            ValueRef::Null => return Err(self.malformed(column, "NULL where a number is required")),
            ValueRef::Blob(_) => return Err(self.malformed(column, "BLOB where a number is required")),
        };
        // NaN or infinity would poison every sum downstream.
        if value.is_finite() {
            Ok(value)
        } else {
            Err(self.malformed(column, format!("{value} is not a finite number")))
        }
    }

    fn year(&self, idx: usize, column: &str) -> Result<i32, DataUnavailable> {
        let value = match self.raw(idx, column)? {
            ValueRef::Integer(i) => i32::try_from(i).ok(),
            ValueRef::Real(f)
                if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 =>
            {
                Some(f as i32)
            }
            ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).trim().parse::<i32>().ok(),
            _ => None,
        };
        value.ok_or_else(|| self.malformed(column, "year is not an integer"))
    }

    fn month(&self, idx: usize, column: &str) -> Result<Month, DataUnavailable> {
        match self.raw(idx, column)? {
            ValueRef::Text(bytes) => String::from_utf8_lossy(bytes)
                .parse::<Month>()
                .map_err(|e| self.malformed(column, e.to_string())),
            ValueRef::Integer(n) => u32::try_from(n)
                .ok()
                .and_then(Month::from_number)
                .ok_or_else(|| self.malformed(column, format!("{n} is not a month number"))),
            _ => Err(self.malformed(column, "month is not a name")),
        }
    }
}

/// Double-quote an SQL identifier, escaping embedded quotes.
fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::params;

    const CREATE: &str = r#"CREATE TABLE sales (
        "Region" TEXT, "Category" TEXT, "Sub-Category" TEXT, "Product Name" TEXT,
        "Year" INTEGER, "Month" TEXT, "Sales" REAL, "Profit" REAL, "Profit Margin (%)" REAL
    )"#;

    fn store_with_rows(rows: &[(&str, &str, &str, &str, i64, &str, f64, f64, f64)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("temp dir");
        let conn = Connection::open(dir.path().join("sales.db")).expect("open store");
        conn.execute_batch(CREATE).expect("create table");
        for r in rows {
            conn.execute(
                "INSERT INTO sales VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![r.0, r.1, r.2, r.3, r.4, r.5, r.6, r.7, r.8],
            )
            .expect("insert row");
        }
        dir
    }

    #[test]
    fn loads_rows_in_store_order() {
        let dir = store_with_rows(&[
            ("East", "Tech", "Phones", "Alpha", 2023, "January", 100.0, 20.0, 20.0),
            ("West", "Tech", "Phones", "Beta", 2023, "February", 50.0, -5.0, -10.0),
        ]);
        let ds = load(&dir.path().join("sales.db"), "sales").expect("load");
        assert_eq!(ds.len(), 2);
        let rows: Vec<&SalesRecord> = ds.iter().collect();
        assert_eq!(rows[0].region, "East");
        assert_eq!(rows[0].product_name, "Alpha");
        assert_eq!(rows[0].year, 2023);
        assert_eq!(rows[0].month, Month::January);
        assert_eq!(rows[1].profit, -5.0);
        assert_eq!(rows[1].profit_margin, -10.0);
    }

    #[test]
    fn empty_relation_is_an_empty_dataset() {
        let dir = store_with_rows(&[]);
        let ds = load(&dir.path().join("sales.db"), "sales").expect("load");
        assert!(ds.is_empty());
    }

    #[test]
    fn missing_store_file_fails_to_open() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("absent.db");
        let err = load(&path, "sales").unwrap_err();
        assert!(matches!(err, DataUnavailable::Open { .. }), "{err}");
        assert!(!path.exists(), "read-only open must not create the file");
    }

    #[test]
    fn missing_relation_is_reported() {
        let dir = store_with_rows(&[]);
        let err = load(&dir.path().join("sales.db"), "orders").unwrap_err();
        assert!(matches!(err, DataUnavailable::Relation { ref relation, .. } if relation == "orders"));
    }

    #[test]
    fn missing_column_is_reported() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("sales.db");
        let conn = Connection::open(&path).expect("open store");
        conn.execute_batch(r#"CREATE TABLE sales ("Region" TEXT, "Sales" REAL)"#)
            .expect("create table");
        drop(conn);

        let err = load(&path, "sales").unwrap_err();
        assert!(
            matches!(err, DataUnavailable::MissingColumn { ref column, .. } if column == "Category"),
            "{err}"
        );
    }

    #[test]
    fn non_numeric_year_is_malformed() {
        let dir = store_with_rows(&[]);
        let path = dir.path().join("sales.db");
        let conn = Connection::open(&path).expect("open store");
        conn.execute(
            "INSERT INTO sales VALUES ('East', 'Tech', 'Phones', 'Alpha', 'soon', 'May', 1.0, 1.0, 100.0)",
            [],
        )
        .expect("insert row");
        drop(conn);

        let err = load(&path, "sales").unwrap_err();
        assert!(
            matches!(err, DataUnavailable::MalformedValue { row: 0, ref column, .. } if column == "Year"),
            "{err}"
        );
    }

    #[test]
    fn unknown_month_is_malformed() {
        let dir = store_with_rows(&[
            ("East", "Tech", "Phones", "Alpha", 2023, "May", 1.0, 1.0, 100.0),
            ("East", "Tech", "Phones", "Alpha", 2023, "Smarch", 1.0, 1.0, 100.0),
        ]);
        let err = load(&dir.path().join("sales.db"), "sales").unwrap_err();
        assert!(
            matches!(err, DataUnavailable::MalformedValue { row: 1, ref column, .. } if column == "Month"),
            "{err}"
        );
    }

    /// Seed an empty store and insert one row given as raw SQL values.
    fn store_with_raw_row(values: &str) -> tempfile::TempDir {
        let dir = store_with_rows(&[]);
        let conn = Connection::open(dir.path().join("sales.db")).expect("open store");
        conn.execute(&format!("INSERT INTO sales VALUES ({values})"), [])
            .expect("insert row");
        dir
    }

    fn malformed_column(dir: &tempfile::TempDir) -> String {
        match load(&dir.path().join("sales.db"), "sales") {
            Err(DataUnavailable::MalformedValue { column, .. }) => column,
            other => panic!("expected MalformedValue, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_real_year_is_malformed() {
        let dir = store_with_raw_row("'E', 'T', 'S', 'P', 1e10, 'May', 1.0, 1.0, 100.0");
        assert_eq!(malformed_column(&dir), "Year");
    }

    #[test]
    fn whole_real_year_is_accepted() {
        let dir = store_with_raw_row("'E', 'T', 'S', 'P', 2023.0, 'May', 1.0, 1.0, 100.0");
        let ds = load(&dir.path().join("sales.db"), "sales").expect("load");
        assert_eq!(ds.iter().map(|r| r.year).collect::<Vec<_>>(), vec![2023]);
    }

    #[test]
    fn non_finite_numbers_are_malformed() {
        let dir = store_with_raw_row("'E', 'T', 'S', 'P', 2023, 'May', 'NaN', 1.0, 100.0");
        assert_eq!(malformed_column(&dir), "Sales");

        let dir = store_with_raw_row("'E', 'T', 'S', 'P', 2023, 'May', 1.0, 'inf', 100.0");
        assert_eq!(malformed_column(&dir), "Profit");
    }

    #[test]
    fn null_in_required_column_is_malformed() {
        let dir = store_with_raw_row("'E', NULL, 'S', 'P', 2023, 'May', 1.0, 1.0, 100.0");
        assert_eq!(malformed_column(&dir), "Category");

        let dir = store_with_raw_row("'E', 'T', 'S', 'P', 2023, 'May', 1.0, 1.0, NULL");
        assert_eq!(malformed_column(&dir), "Profit Margin (%)");
    }

    #[test]
    fn text_where_number_required_is_malformed() {
        let dir = store_with_raw_row("'E', 'T', 'S', 'P', 2023, 'May', 'abc', 1.0, 100.0");
        assert_eq!(malformed_column(&dir), "Sales");
    }

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_identifier("sales"), "\"sales\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
    }
}
