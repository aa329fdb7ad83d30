//! Validated atomic-structure data for neutral atoms, shaped for consumption
//! by an atomic-structure solver.
//!
//! A [`Species`][species::Species] holds a fixed table of fine-structure
//! levels, their hyperfine/Zeeman coupling constants, and the optical
//! transitions between them; [`Atom`][atom::Atom] is the validated descriptor
//! built from such a table.

pub mod spin;
pub mod consts;
pub mod error;
pub mod level;
pub mod atom;
pub mod species;
pub mod config;
pub mod hyperfine;
pub mod hilbert;

pub use atom::{ Atom, AtomSpec, LevelFilter };
pub use error::{ AtomError, AtomResult, ConfigurationError, LookupError };
pub use level::{ Level, LevelData, Transition };
pub use species::{ Rb87, Species };
