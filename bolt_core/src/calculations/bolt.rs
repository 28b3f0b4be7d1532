//! # Bolt Calculation
//!
//! Preload, axial load and tightening torque of a threaded fastener.
//!
//! A [`Bolt`] is built once from a thread designation, a strength class and a
//! preload fraction. Construction resolves the thread row, decodes Re/Rm and
//! derives the axial load Fi. Torque depends on joint geometry and friction,
//! so it is computed on demand and never stored.
//!
//! ## Formulas
//!
//! - Fi = round(preload · Re · A / 1000, 2) kN
//! - φ = P / (π · d2)
//! - ρ = atan(μ)
//! - T = round(Fi / 2 · (d2 · tan(φ + ρ) + dm · μ), 2) kN·mm
//!
//! φ is used directly as an angle; the textbook lead angle is atan(P / (π · d2)).
//! For metric coarse threads φ stays below 0.06 rad, where the two differ by
//! roughly 0.1 %.
//!
//! ## Example
//!
//! ```rust
//! use bolt_core::calculations::bolt::{calculate, BoltInput, DEFAULT_FRICTION_COEFF};
//! use bolt_core::materials::builtin_metric_coarse;
//!
//! let table = builtin_metric_coarse()?;
//! let bolt = calculate(table, &BoltInput::new("M10", "8.8"))?;
//!
//! assert_eq!(bolt.re_mpa, 640);
//! assert_eq!(bolt.fi_kn, 22.27);
//!
//! let torque_kn_mm = bolt.torque(13.0, DEFAULT_FRICTION_COEFF);
//! assert!(torque_kn_mm > 0.0);
//! # Ok::<(), bolt_core::errors::BoltError>(())
//! ```

use std::f64::consts::PI;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::BoltResult;
use crate::file_io::load_table;
use crate::materials::{StrengthClass, ThreadSpec, ThreadTable};
use crate::units::{round_to, N_PER_KN};

/// Preload as a fraction of yield strength when none is given
pub const DEFAULT_PRELOAD: f64 = 0.6;

/// Thread and bearing-face friction coefficient when none is given
pub const DEFAULT_FRICTION_COEFF: f64 = 0.15;

fn default_preload() -> f64 {
    DEFAULT_PRELOAD
}

/// Input parameters for a bolt.
///
/// ## JSON Example
///
/// ```json
/// {
///   "thread": "M10",
///   "strength_class": "8.8",
///   "preload": 0.6
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoltInput {
    /// Thread designation, must match a table key exactly (e.g. "M10")
    pub thread: String,

    /// Strength class `x.y` (e.g. "8.8")
    pub strength_class: String,

    /// Preload as a fraction of yield strength. Any positive value is accepted.
    #[serde(default = "default_preload")]
    pub preload: f64,
}

impl BoltInput {
    /// Input with the default preload of 0.6
    pub fn new(thread: impl Into<String>, strength_class: impl Into<String>) -> Self {
        BoltInput {
            thread: thread.into(),
            strength_class: strength_class.into(),
            preload: DEFAULT_PRELOAD,
        }
    }

    pub fn with_preload(mut self, preload: f64) -> Self {
        self.preload = preload;
        self
    }
}

/// A bolt with resolved dimensions, strengths and axial load.
///
/// ## JSON Example
///
/// ```json
/// {
///   "designation": "M10",
///   "strength_class": "8.8",
///   "re_mpa": 640,
///   "rm_mpa": 800,
///   "pitch_mm": 1.5,
///   "d_mm": 10.0,
///   "d2_mm": 9.026,
///   "d1_mm": 8.16,
///   "d3_mm": 8.376,
///   "area_mm2": 58.0,
///   "fi_kn": 22.27,
///   "preload": 0.6,
///   "raw_row": { "designation": "M10", "pitch_mm": 1.5, "...": "..." }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bolt {
    /// Thread designation
    pub designation: String,

    /// Decoded strength class
    pub strength_class: StrengthClass,

    /// Yield strength Re (MPa)
    pub re_mpa: u32,

    /// Ultimate tensile strength Rm (MPa)
    pub rm_mpa: u32,

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

    /// Axial load Fi (kN)
    pub fi_kn: f64,

    /// Preload fraction used for Fi
    pub preload: f64,

    /// The table row this bolt was built from
    pub raw_row: ThreadSpec,
}

impl Bolt {
    /// Build a bolt against an already loaded table.
    ///
    /// # Returns
    ///
    /// * `Ok(Bolt)` - Resolved bolt
    /// * `Err(BoltError::InvalidStrengthClass)` - `strength_class` is not `<int>.<int>`
    /// * `Err(BoltError::ThreadNotFound)` - `thread` is not in `table`
    pub fn create(table: &ThreadTable, thread: &str, strength_class: &str, preload: f64) -> BoltResult<Self> {
        let class: StrengthClass = strength_class.parse()?;
        let row = resolve_dimensions(table, thread)?;

        let re_mpa = class.yield_strength_mpa();
        let rm_mpa = class.tensile_strength_mpa();
        let fi_kn = axial_load(re_mpa, row.area_mm2, preload);

        debug!(thread, %class, preload, fi_kn, "Bolt resolved");

        Ok(Bolt {
            designation: row.designation.clone(),
            strength_class: class,
            re_mpa,
            rm_mpa,
            pitch_mm: row.pitch_mm,
            d_mm: row.d_mm,
            d2_mm: row.d2_mm,
            d1_mm: row.d1_mm,
            d3_mm: row.d3_mm,
            area_mm2: row.area_mm2,
            fi_kn,
            preload,
            raw_row: row,
        })
    }

    /// Build a bolt by reading the table file at `path`.
    ///
    /// The file is read on every call.
    pub fn from_table_file(path: &Path, thread: &str, strength_class: &str, preload: f64) -> BoltResult<Self> {
        let table = load_table(path)?;
        Self::create(&table, thread, strength_class, preload)
    }

    /// Axial load (kN) for a preload fraction `load`, using this bolt's Re and A
    pub fn axial_load(&self, load: f64) -> f64 {
        axial_load(self.re_mpa, self.area_mm2, load)
    }

    /// Tightening torque (kN·mm, equal to N·m).
    ///
    /// # Arguments
    ///
    /// * `dm_mm` - Effective friction diameter at the bearing face (mm)
    /// * `friction_coeff` - Friction coefficient μ for threads and bearing face
    pub fn torque(&self, dm_mm: f64, friction_coeff: f64) -> f64 {
        // Used as an angle without atan; see module docs.
        let inclination_angle = self.pitch_mm / (PI * self.d2_mm);
        let friction_angle = friction_coeff.atan();

        round_to(
            self.fi_kn / 2.0
                * (self.d2_mm * (inclination_angle + friction_angle).tan() + dm_mm * friction_coeff),
            2,
        )
    }

    /// Re-read the full table row for this bolt's designation.
    pub fn summary(&self, table: &ThreadTable) -> BoltResult<ThreadSpec> {
        resolve_dimensions(table, &self.designation)
    }
}

/// Calculate a bolt from its input record.
pub fn calculate(table: &ThreadTable, input: &BoltInput) -> BoltResult<Bolt> {
    Bolt::create(table, &input.thread, &input.strength_class, input.preload)
}

/// Look up the six dimensions (P, d, d2, d1, d3, A) for `designation`.
pub fn resolve_dimensions(table: &ThreadTable, designation: &str) -> BoltResult<ThreadSpec> {
    table.lookup(designation).cloned()
}

/// Axial load Fi = round(load · Re · A / 1000, 2) in kN.
pub fn axial_load(re_mpa: u32, area_mm2: f64, load: f64) -> f64 {
    round_to(load * f64::from(re_mpa) * area_mm2 / N_PER_KN, 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{BoltError, ErrorKind};
    use crate::file_io::save_table;
    use tempfile::tempdir;

    fn m10_table() -> ThreadTable {
        let mut table = ThreadTable::new();
        table
            .insert(ThreadSpec::from_dimensions("M8", [1.25, 8.0, 7.188, 6.466, 6.647, 36.6]))
            .unwrap();
        table
            .insert(ThreadSpec::from_dimensions("M10", [1.5, 10.0, 9.026, 8.16, 8.376, 58.0]))
            .unwrap();
        table
    }

    fn test_bolt() -> Bolt {
        calculate(&m10_table(), &BoltInput::new("M10", "8.8")).unwrap()
    }

    #[test]
    fn test_m10_8_8() {
        let bolt = test_bolt();
        assert_eq!(bolt.re_mpa, 640);
        assert_eq!(bolt.rm_mpa, 800);
        assert_eq!(bolt.preload, 0.6);
        // 0.6 * 640 * 58.0 / 1000 = 22.272
        assert_eq!(bolt.fi_kn, 22.27);
    }

    #[test]
    fn test_dimensions_copied_unchanged() {
        let bolt = test_bolt();
        assert_eq!(
            [bolt.pitch_mm, bolt.d_mm, bolt.d2_mm, bolt.d1_mm, bolt.d3_mm, bolt.area_mm2],
            [1.5, 10.0, 9.026, 8.16, 8.376, 58.0]
        );
        assert_eq!(bolt.raw_row.dimensions(), [1.5, 10.0, 9.026, 8.16, 8.376, 58.0]);
    }

    #[test]
    fn test_resolve_dimensions() {
        let table = m10_table();
        for row in table.rows() {
            let resolved = resolve_dimensions(&table, &row.designation).unwrap();
            assert_eq!(resolved.dimensions(), row.dimensions());
        }
    }

    #[test]
    fn test_resolve_missing_thread() {
        let err = resolve_dimensions(&m10_table(), "M999-NONEXISTENT").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
    }

    #[test]
    fn test_create_missing_thread() {
        let err = Bolt::create(&m10_table(), "M7", "8.8", 0.6).unwrap_err();
        assert_eq!(err, BoltError::thread_not_found("M7"));
    }

    #[test]
    fn test_create_bad_strength_class() {
        let err = Bolt::create(&m10_table(), "M10", "8", 0.6).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_strength_class_checked_before_thread() {
        let err = Bolt::create(&m10_table(), "M7", "abc.9", 0.6).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_preload_not_bounded() {
        let bolt = calculate(&m10_table(), &BoltInput::new("M10", "8.8").with_preload(1.5)).unwrap();
        // 1.5 * 640 * 58 / 1000 = 55.68
        assert_eq!(bolt.fi_kn, 55.68);
    }

    #[test]
    fn test_axial_load_method() {
        let bolt = test_bolt();
        assert_eq!(bolt.axial_load(0.6), bolt.fi_kn);
        // 0.9 * 640 * 58 / 1000 = 33.408
        assert_eq!(bolt.axial_load(0.9), 33.41);
    }

    #[test]
    fn test_axial_load_rounds_stored_value() {
        // 0.5 * 900 * 20.1 / 1000 is stored just below 9.045
        assert_eq!(axial_load(900, 20.1, 0.5), 9.04);
        assert_eq!(axial_load(900, 36.6, 0.75), 24.7);
    }

    #[test]
    fn test_torque_value() {
        let bolt = test_bolt();
        let phi = 1.5 / (PI * 9.026);
        let rho = 0.15f64.atan();
        let expected = 22.27 / 2.0 * (9.026 * (phi + rho).tan() + 13.0 * 0.15);

        let torque = bolt.torque(13.0, 0.15);
        assert!((torque - expected).abs() <= 0.005 + 1e-9);
        assert!(torque > 42.0 && torque < 42.5);
    }

    #[test]
    fn test_torque_is_repeatable() {
        let bolt = test_bolt();
        let first = bolt.torque(14.5, DEFAULT_FRICTION_COEFF);
        let second = bolt.torque(14.5, DEFAULT_FRICTION_COEFF);
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_torque_friction_leaves_bolt_unchanged() {
        let bolt = test_bolt();
        let before = bolt.clone();

        let low = bolt.torque(13.0, 0.10);
        let high = bolt.torque(13.0, 0.20);

        assert!(high > low);
        assert_eq!(bolt, before);
    }

    #[test]
    fn test_torque_without_friction() {
        let bolt = test_bolt();
        let phi = 1.5 / (PI * 9.026);
        let expected = round_to(22.27 / 2.0 * (9.026 * phi.tan() + 13.0 * 0.0), 2);
        assert_eq!(bolt.torque(13.0, 0.0), expected);
    }

    #[test]
    fn test_identical_inputs_identical_bolts() {
        let table = m10_table();
        let a = Bolt::create(&table, "M10", "10.9", 0.7).unwrap();
        let b = Bolt::create(&table, "M10", "10.9", 0.7).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_row_order_does_not_matter() {
        let mut reversed = ThreadTable::new();
        for row in m10_table().rows().iter().rev() {
            reversed.insert(row.clone()).unwrap();
        }
        let a = Bolt::create(&m10_table(), "M10", "8.8", 0.6).unwrap();
        let b = Bolt::create(&reversed, "M10", "8.8", 0.6).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_summary() {
        let table = m10_table();
        let bolt = test_bolt();
        let row = bolt.summary(&table).unwrap();
        assert_eq!(row, bolt.raw_row);
    }

    #[test]
    fn test_summary_missing_in_other_table() {
        let bolt = test_bolt();
        let err = bolt.summary(&ThreadTable::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Lookup);
    }

    #[test]
    fn test_from_table_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("threads.csv");
        save_table(&m10_table(), &path).unwrap();

        let bolt = Bolt::from_table_file(&path, "M10", "8.8", DEFAULT_PRELOAD).unwrap();
        assert_eq!(bolt, test_bolt());
    }

    #[test]
    fn test_from_missing_table_file() {
        let dir = tempdir().unwrap();
        let err = Bolt::from_table_file(&dir.path().join("missing.csv"), "M10", "8.8", 0.6).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_input_default_preload_from_json() {
        let input: BoltInput = serde_json::from_str(r#"{"thread":"M10","strength_class":"8.8"}"#).unwrap();
        assert_eq!(input.preload, DEFAULT_PRELOAD);
    }

    #[test]
    fn test_serialization() {
        let bolt = test_bolt();
        let json = serde_json::to_string_pretty(&bolt).unwrap();
        let roundtrip: Bolt = serde_json::from_str(&json).unwrap();
        assert_eq!(bolt.designation, roundtrip.designation);
        assert_eq!(bolt.strength_class, roundtrip.strength_class);
        assert_eq!(bolt.re_mpa, roundtrip.re_mpa);
        assert!((bolt.fi_kn - roundtrip.fi_kn).abs() < 1e-9);
        assert!(json.contains(r#""strength_class": "8.8""#));
    }
}
