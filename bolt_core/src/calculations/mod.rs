//! # Fastener Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `calculate(table, input) -> BoltResult<..>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`bolt`] - Bolt axial load and tightening torque

pub mod bolt;

pub use bolt::{calculate, Bolt, BoltInput, DEFAULT_FRICTION_COEFF, DEFAULT_PRELOAD};
