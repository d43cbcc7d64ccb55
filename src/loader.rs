//! # Table Loader
//!
//! Reads the six procurement tables (`<name>.csv` with a header row) from a
//! directory. No schema coercion happens here: columns and cells are kept
//! as-is, and numeric interpretation is deferred to [`Row::float`].

use std::io;
use std::path::Path;

use csv::StringRecord;
use hashbrown::HashMap;
use tracing::info;

use crate::{Error, Result};

/// Required tables, in load order.
pub const TABLE_NAMES: [&str; 6] = [
    "suppliers",
    "components",
    "countries",
    "contracts",
    "routes",
    "sourcing_links",
];

/// Command that produces the input tables.
pub const GENERATE_HINT: &str = "python -m src.data.generator";

// ============================================================================
// Table
// ============================================================================

/// One raw table. Row order is file order and is authoritative: it becomes
/// the dense index order of the nodes built from it.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    columns: Vec<String>,
    column_index: HashMap<String, usize>,
    records: Vec<StringRecord>,
}

impl Table {
    /// Parse CSV with a header row from any reader.
    pub fn from_reader<R: io::Read>(name: impl Into<String>, reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let columns: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();
        let mut column_index = HashMap::with_capacity(columns.len());
        for (i, col) in columns.iter().enumerate() {
            // First occurrence wins on duplicate headers
            column_index.entry(col.clone()).or_insert(i);
        }

        let records = rdr.records().collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { name: name.into(), columns, column_index, records })
    }

    pub fn from_path(name: impl Into<String>, path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(name, io::BufReader::new(file))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows in file order.
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> + '_ {
        self.records.iter().map(move |record| Row { table: self, record })
    }
}

/// Borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    table: &'a Table,
    record: &'a StringRecord,
}

impl<'a> Row<'a> {
    /// Raw cell. `None` if the column is absent or the row is short.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = *self.table.column_index.get(column)?;
        self.record.get(idx)
    }

    /// Text cell, empty when absent.
    pub fn text(&self, column: &str) -> &'a str {
        self.get(column).unwrap_or("")
    }

    /// Numeric cell with tolerant coercion. Never fails.
    pub fn float(&self, column: &str) -> f64 {
        coerce_f64(self.get(column))
    }

    /// Boolean-like cell: nonzero after coercion.
    pub fn flag(&self, column: &str) -> bool {
        self.float(column) != 0.0
    }
}

/// Tolerant numeric coercion.
///
/// Missing, empty, NaN, infinite and non-numeric cells all become `0.0`.
/// `true`/`false` in any case become `1.0`/`0.0`.
pub fn coerce_f64(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else { return 0.0 };
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        return 1.0;
    }
    if raw.eq_ignore_ascii_case("false") {
        return 0.0;
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

// ============================================================================
// Tables
// ============================================================================

/// The six input tables of one build.
#[derive(Debug, Clone)]
pub struct Tables {
    pub suppliers: Table,
    pub components: Table,
    pub countries: Table,
    pub contracts: Table,
    pub routes: Table,
    pub sourcing_links: Table,
}

impl Tables {
    /// Load every required table from `dir`.
    ///
    /// Fails with [`Error::MissingInput`] on the first absent file, naming it
    /// and the command that generates it.
    pub fn load(dir: &Path) -> Result<Self> {
        let mut loaded = Vec::with_capacity(TABLE_NAMES.len());
        for name in TABLE_NAMES {
            let path = dir.join(format!("{name}.csv"));
            if !path.exists() {
                return Err(Error::MissingInput { path, hint: GENERATE_HINT.to_string() });
            }
            let table = Table::from_path(name, &path)?;
            info!("  Loaded {:<18} {} rows", table.name(), table.len());
            loaded.push(table);
        }

        let [suppliers, components, countries, contracts, routes, sourcing_links]: [Table; 6] =
            loaded
                .try_into()
                .map_err(|_| Error::Config("expected exactly six tables".into()))?;
        Ok(Self { suppliers, components, countries, contracts, routes, sourcing_links })
    }
}
