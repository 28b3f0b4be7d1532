//! # Unit Helpers
//!
//! bolt_core works in a fixed SI-derived set of units and keeps values as
//! plain `f64` so JSON stays clean:
//!
//! - Length: millimeters (mm)
//! - Area: square millimeters (mm²)
//! - Stress: megapascals (MPa = N/mm²)
//! - Force: kilonewtons (kN)
//! - Torque: kilonewton-millimeters (kN·mm), numerically equal to N·m
//!
//! ## Example
//!
//! ```rust
//! use bolt_core::units::round_to;
//!
//! assert_eq!(round_to(22.272, 2), 22.27);
//! assert_eq!(round_to(10.075, 2), 10.07);
//! ```

/// Newtons per kilonewton; divides an N force (MPa · mm²) down to kN.
pub const N_PER_KN: f64 = 1000.0;

/// Round `value` to `places` decimal places.
///
/// Rounds the exact binary value, so `10.075` (stored as 10.07499...) goes
/// down to `10.07`. Scaling by `10^places` first would push it up to 10.08.
pub fn round_to(value: f64, places: usize) -> f64 {
    format!("{:.*}", places, value).parse().unwrap_or(value)
}
