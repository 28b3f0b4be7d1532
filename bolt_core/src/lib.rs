//! # bolt_core - Bolt Calculation Engine
//!
//! Preload, axial load and tightening torque for threaded fasteners, from a
//! thread dimension table and an ISO-style strength class.
//!
//! ## Quick Start
//!
//! ```rust
//! use bolt_core::{Bolt, builtin_metric_coarse};
//!
//! let table = builtin_metric_coarse()?;
//! let bolt = Bolt::create(table, "M10", "8.8", 0.6)?;
//!
//! println!("Fi = {} kN", bolt.fi_kn);
//! println!("T  = {} N·m", bolt.torque(13.0, 0.15));
//! # Ok::<(), bolt_core::BoltError>(())
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - Bolt model (axial load, torque)
//! - [`materials`] - Thread dimension table and strength classes
//! - [`file_io`] - Reference table load/save
//! - [`table_builder`] - Offline scraper that produces the reference table
//! - [`units`] - Rounding and unit helpers
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod materials;
pub mod table_builder;
pub mod units;

pub use calculations::{Bolt, BoltInput};
pub use errors::{BoltError, BoltResult, ErrorKind};
pub use file_io::{load_table, save_table};
pub use materials::{builtin_metric_coarse, ThreadSpec, ThreadTable};
