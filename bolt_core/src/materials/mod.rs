//! # Materials Database
//!
//! Reference data for fasteners:
//!
//! - [`threads`] - Thread dimension table (pitch, diameters, stress area)
//! - [`strength`] - Strength class decoding (yield and tensile strength)

pub mod strength;
pub mod threads;

pub use strength::{decode_strength_class, StrengthClass};
pub use threads::{builtin_metric_coarse, ThreadSpec, ThreadTable};
