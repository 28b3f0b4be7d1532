//! Thread Dimension Table
//!
//! Geometric reference data for threaded fasteners, keyed by thread
//! designation (e.g. "M10"). The table is produced offline by the
//! [table builder](crate::table_builder) and read here as CSV.
//!
//! ## File Format
//!
//! One header row, then one row per designation. The designation key is the
//! first column, followed by six numeric columns in fixed order:
//!
//! | column | meaning                 | unit |
//! |--------|-------------------------|------|
//! | P      | pitch                   | mm   |
//! | d      | nominal diameter        | mm   |
//! | d2     | pitch diameter          | mm   |
//! | d1     | root diameter           | mm   |
//! | d3     | minor diameter          | mm   |
//! | A      | tensile stress area     | mm²  |
//!
//! Columns are read by position; header names are not checked.
//!
//! ## Example
//!
//! ```rust
//! use bolt_core::materials::threads::builtin_metric_coarse;
//!
//! let table = builtin_metric_coarse()?;
//! let m10 = table.lookup("M10")?;
//! assert_eq!(m10.pitch_mm, 1.5);
//! assert_eq!(m10.area_mm2, 58.0);
//! # Ok::<(), bolt_core::errors::BoltError>(())
//! ```

use std::collections::HashMap;
use std::io::{Read, Write};

use once_cell::sync::Lazy;
use rust_embed::RustEmbed;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{BoltError, BoltResult};

/// Header row written to reference table files
pub const TABLE_HEADER: [&str; 7] = [
    "designation",
    "P [mm]",
    "d [mm]",
    "d2 [mm]",
    "d1 [mm]",
    "d3 [mm]",
    "A [mm2]",
];

/// One row of the reference table.
///
/// The ordering d1 < d3 ≤ d2 < d holds for real threads but is not
/// checked; values are carried exactly as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadSpec {
    /// Thread designation, the table key (e.g. "M10")
    pub designation: String,

    /// Pitch P (mm)
    pub pitch_mm: f64,

    /// Nominal diameter d (mm)
    pub d_mm: f64,

    /// Pitch diameter d2 (mm)
    pub d2_mm: f64,

    /// Root diameter d1 (mm)
    pub d1_mm: f64,

    /// Minor diameter d3 (mm)
    pub d3_mm: f64,

    /// Tensile stress area A (mm²)
    pub area_mm2: f64,
}

impl ThreadSpec {
    /// The six numeric fields in table order: P, d, d2, d1, d3, A
    pub fn dimensions(&self) -> [f64; 6] {
        [
            self.pitch_mm,
            self.d_mm,
            self.d2_mm,
            self.d1_mm,
            self.d3_mm,
            self.area_mm2,
        ]
    }

    /// Build a row from a designation and the six fields in table order
    pub fn from_dimensions(designation: impl Into<String>, dims: [f64; 6]) -> Self {
        let [pitch_mm, d_mm, d2_mm, d1_mm, d3_mm, area_mm2] = dims;
        ThreadSpec {
            designation: designation.into(),
            pitch_mm,
            d_mm,
            d2_mm,
            d1_mm,
            d3_mm,
            area_mm2,
        }
    }
}

impl std::fmt::Display for ThreadSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (P={} mm, d={} mm, d2={} mm, d1={} mm, d3={} mm, A={} mm²)",
            self.designation,
            self.pitch_mm,
            self.d_mm,
            self.d2_mm,
            self.d1_mm,
            self.d3_mm,
            self.area_mm2
        )
    }
}

/// Reference table of thread dimensions.
///
/// Rows keep their insertion order; lookup is by exact (case-sensitive)
/// designation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThreadTable {
    rows: Vec<ThreadSpec>,
    index: HashMap<String, usize>,
}

impl ThreadTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row. Designations must be unique.
    pub fn insert(&mut self, spec: ThreadSpec) -> BoltResult<()> {
        if self.index.contains_key(&spec.designation) {
            return Err(BoltError::table_parse(
                "thread table",
                format!("duplicate designation '{}'", spec.designation),
            ));
        }
        self.index.insert(spec.designation.clone(), self.rows.len());
        self.rows.push(spec);
        Ok(())
    }

    /// Look up a row by its exact designation
    pub fn lookup(&self, designation: &str) -> BoltResult<&ThreadSpec> {
        self.index
            .get(designation)
            .map(|&i| &self.rows[i])
            .ok_or_else(|| BoltError::thread_not_found(designation))
    }

    /// All rows in insertion order
    pub fn rows(&self) -> &[ThreadSpec] {
        &self.rows
    }

    /// All designations in insertion order
    pub fn designations(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.designation.as_str()).collect()
    }

    /// Rows whose designation starts with `prefix`
    pub fn search(&self, prefix: &str) -> Vec<&ThreadSpec> {
        self.rows
            .iter()
            .filter(|r| r.designation.starts_with(prefix))
            .collect()
    }

    /// Append every row of `other`, rejecting designations already present
    pub fn extend(&mut self, other: ThreadTable) -> BoltResult<()> {
        for row in other.rows {
            self.insert(row)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parse a table from CSV text.
    ///
    /// `source_name` only labels error messages (usually the file path).
    pub fn from_csv_reader<R: Read>(reader: R, source_name: &str) -> BoltResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut table = ThreadTable::new();

        for result in rdr.records() {
            let record = result.map_err(|e| BoltError::table_parse(source_name, e.to_string()))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            if record.iter().all(|field| field.is_empty()) {
                continue;
            }
            if record.len() < TABLE_HEADER.len() {
                return Err(BoltError::table_parse(
                    source_name,
                    format!(
                        "line {}: expected {} columns, found {}",
                        line,
                        TABLE_HEADER.len(),
                        record.len()
                    ),
                ));
            }

            let mut dims = [0.0; 6];
            for (i, dim) in dims.iter_mut().enumerate() {
                let raw = &record[i + 1];
                *dim = raw.parse::<f64>().map_err(|_| {
                    BoltError::table_parse(
                        source_name,
                        format!("line {}: column '{}' is not a number: '{}'", line, TABLE_HEADER[i + 1], raw),
                    )
                })?;
            }

            table
                .insert(ThreadSpec::from_dimensions(&record[0], dims))
                .map_err(|_| {
                    BoltError::table_parse(
                        source_name,
                        format!("line {}: duplicate designation '{}'", line, &record[0]),
                    )
                })?;
        }

        debug!(source = source_name, rows = table.len(), "Thread table parsed");
        Ok(table)
    }

    /// Write the table as CSV with the standard header
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        wtr.write_record(TABLE_HEADER)?;
        for row in &self.rows {
            let mut record = vec![row.designation.clone()];
            record.extend(row.dimensions().iter().map(|v| v.to_string()));
            wtr.write_record(&record)?;
        }
        wtr.flush()?;
        Ok(())
    }
}

// ============================================================================
// Built-in ISO metric coarse threads (for use without a table file)
// ============================================================================

#[derive(RustEmbed)]
#[folder = "assets/threads/"]
struct ThreadAssets;

const BUILTIN_FILE: &str = "metric_coarse.csv";

static BUILTIN: Lazy<BoltResult<ThreadTable>> = Lazy::new(|| {
    let file = ThreadAssets::get(BUILTIN_FILE)
        .ok_or_else(|| BoltError::file_error("embed", BUILTIN_FILE, "asset not bundled"))?;
    ThreadTable::from_csv_reader(file.data.as_ref(), BUILTIN_FILE)
});

/// Bundled table of ISO metric coarse threads M3 to M24.
pub fn builtin_metric_coarse() -> BoltResult<&'static ThreadTable> {
    BUILTIN.as_ref().map_err(Clone::clone)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
designation,P [mm],d [mm],d2 [mm],d1 [mm],d3 [mm],A [mm2]
M8,1.25,8,7.188,6.466,6.647,36.6
M10,1.5,10,9.026,8.16,8.376,58.0
";

    #[test]
    fn test_parse_sample() {
        let table = ThreadTable::from_csv_reader(SAMPLE.as_bytes(), "sample").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.designations(), vec!["M8", "M10"]);

        let m10 = table.lookup("M10").unwrap();
        assert_eq!(m10.dimensions(), [1.5, 10.0, 9.026, 8.16, 8.376, 58.0]);
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let table = ThreadTable::from_csv_reader(SAMPLE.as_bytes(), "sample").unwrap();
        assert!(table.lookup("m10").is_err());
    }

    #[test]
    fn test_lookup_missing() {
        let table = ThreadTable::from_csv_reader(SAMPLE.as_bytes(), "sample").unwrap();
        let err = table.lookup("M999-NONEXISTENT").unwrap_err();
        assert_eq!(err, BoltError::thread_not_found("M999-NONEXISTENT"));
    }

    #[test]
    fn test_header_names_are_not_checked() {
        let csv = "OZNACZENIE,a,b,c,d,e,f\nM6,1,6,5.35,4.773,4.917,20.1\n";
        let table = ThreadTable::from_csv_reader(csv.as_bytes(), "renamed").unwrap();
        assert_eq!(table.lookup("M6").unwrap().area_mm2, 20.1);
    }

    #[test]
    fn test_short_row_rejected() {
        let csv = "designation,P,d\nM6,1,6\n";
        let err = ThreadTable::from_csv_reader(csv.as_bytes(), "short").unwrap_err();
        assert!(matches!(err, BoltError::TableParse { .. }));
    }

    #[test]
    fn test_non_numeric_rejected() {
        let csv = "designation,P,d,d2,d1,d3,A\nM6,1,6,5;35,4.773,4.917,20.1\n";
        let err = ThreadTable::from_csv_reader(csv.as_bytes(), "bad").unwrap_err();
        assert!(err.to_string().contains("d2 [mm]"));
    }

    #[test]
    fn test_duplicate_designation_rejected() {
        let csv = format!("{}M8,1.25,8,7.188,6.466,6.647,36.6\n", SAMPLE);
        let err = ThreadTable::from_csv_reader(csv.as_bytes(), "dup").unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_write_then_parse_keeps_values() {
        let table = ThreadTable::from_csv_reader(SAMPLE.as_bytes(), "sample").unwrap();
        let mut buf = Vec::new();
        table.write_csv(&mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("designation,P [mm],d [mm],d2 [mm],d1 [mm],d3 [mm],A [mm2]"));

        let reparsed = ThreadTable::from_csv_reader(text.as_bytes(), "written").unwrap();
        assert_eq!(table, reparsed);
    }

    #[test]
    fn test_builtin_table() {
        let table = builtin_metric_coarse().unwrap();
        assert_eq!(table.len(), 11);

        let m10 = table.lookup("M10").unwrap();
        assert_eq!(m10.dimensions(), [1.5, 10.0, 9.026, 8.16, 8.376, 58.0]);

        for row in table.rows() {
            assert!(row.d1_mm < row.d3_mm, "{}", row);
            assert!(row.d3_mm <= row.d2_mm, "{}", row);
            assert!(row.d2_mm < row.d_mm, "{}", row);
        }
    }

    #[test]
    fn test_search_prefix() {
        let table = builtin_metric_coarse().unwrap();
        let m1x: Vec<_> = table.search("M1").iter().map(|r| r.designation.as_str()).collect();
        assert_eq!(m1x, vec!["M10", "M12", "M14", "M16"]);
    }

    #[test]
    fn test_extend_rejects_overlap() {
        let mut table = ThreadTable::from_csv_reader(SAMPLE.as_bytes(), "a").unwrap();
        let again = ThreadTable::from_csv_reader(SAMPLE.as_bytes(), "b").unwrap();
        assert!(table.extend(again).is_err());
    }
}
