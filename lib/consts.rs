//! Physical constants and per-isotope nuclear constants.
//!
//! All quantities are in SI units unless noted otherwise.

use std::f64::consts::TAU;

// Planck constant [J s] (exact)
pub const H: f64 = 6.62607015e-34;

// reduced Planck constant [J s]
pub const HBAR: f64 = H / TAU;

// speed of light [m / s] (exact)
pub const C: f64 = 299_792_458.0;

// Bohr magneton [J / T]
pub const MU_B: f64 = 9.2740100783e-24;

/// Nuclear spin of Rb-87, in halves.
pub const RB87_I_HALVES: u32 = 3;

/// Nuclear g-factor of Rb-87 [dimensionless].
///
/// This is a property of the nucleus, shared by every electronic level of the
/// atom.
pub const RB87_G_I: f64 = -0.000955141410;

/// Convert a frequency in Hz to an energy in joules.
pub fn hz_to_joules(f: f64) -> f64 { f * H }

/// Convert an energy in joules to a frequency in Hz.
pub fn joules_to_hz(e: f64) -> f64 { e / H }
