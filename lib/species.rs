//! Fixed per-isotope data tables.
//!
//! Each species provides its level table and transition table as literal
//! physical constants; [`Species::atom`] turns them into a validated
//! [`Atom`].

use std::f64::consts::TAU;
use indexmap::IndexMap;
use crate::{
    atom::{ Atom, AtomSpec, LevelFilter },
    config::AtomConfig,
    consts::{ hz_to_joules, RB87_G_I, RB87_I_HALVES },
    error::ConfigurationError,
    level::{ Level, LevelData, Transition },
    spin::SpinTotal,
};

/// A single isotope with a fixed table of levels and transitions.
pub trait Species {
    /// Human-readable name of the isotope.
    const NAME: &'static str;

    /// Nuclear spin.
    const NUCLEAR_SPIN: SpinTotal;

    /// Nuclear g-factor, shared by every level.
    const G_I: f64;

    /// Level table, in canonical order.
    fn levels() -> IndexMap<Level, LevelData>;

    /// Transition table, keyed by label.
    fn transitions() -> IndexMap<String, Transition>;

    /// Collect the raw tables into an unvalidated [`AtomSpec`].
    fn spec() -> AtomSpec {
        AtomSpec {
            name: Self::NAME.to_string(),
            nuclear_spin: Self::NUCLEAR_SPIN,
            g_i: Self::G_I,
            levels: Self::levels(),
            transitions: Self::transitions(),
        }
    }

    /// Construct a validated descriptor.
    ///
    /// `field` is the magnetic field magnitude in tesla, with `None` meaning
    /// field-free.
    fn atom(field: Option<f64>, filter: LevelFilter)
        -> Result<Atom, ConfigurationError>
    {
        Atom::new(Self::spec(), field, filter)
    }

    /// Construct a validated descriptor from a parsed configuration.
    fn from_config(config: &AtomConfig) -> Result<Atom, ConfigurationError> {
        Self::atom(config.field, config.level_filter()?)
    }
}

const HALF: SpinTotal = SpinTotal::new(1);

/// Rb-87 5S1/2 ground level.
pub const RB87_S12: Level
    = Level::new_unchecked(5, HALF, 0, SpinTotal::new(1));
/// Rb-87 5P1/2 level (D1 line upper level).
pub const RB87_P12: Level
    = Level::new_unchecked(5, HALF, 1, SpinTotal::new(1));
/// Rb-87 5P3/2 level (D2 line upper level).
pub const RB87_P32: Level
    = Level::new_unchecked(5, HALF, 1, SpinTotal::new(3));
pub const RB87_GROUND: Level = RB87_S12;

/// Rubidium-87.
///
/// Constants from D. A. Steck, "Rubidium 87 D Line Data" (revision 2.3.2,
/// 10 September 2023).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Rb87;

impl Species for Rb87 {
    const NAME: &'static str = "87Rb";
    const NUCLEAR_SPIN: SpinTotal = SpinTotal::new(RB87_I_HALVES);
    const G_I: f64 = RB87_G_I;

    fn levels() -> IndexMap<Level, LevelData> {
        [
            (
                RB87_S12,
                LevelData::new(
                    hz_to_joules(3.417341305452155e9),
                    2.0023311320,
                    Self::G_I,
                ),
            ),
            (
                RB87_P12,
                LevelData::new(hz_to_joules(408.32815e6), 0.666, Self::G_I),
            ),
            (
                RB87_P32,
                LevelData::new(hz_to_joules(84.4717530e6), 1.336213, Self::G_I)
                    .with_quadrupole(hz_to_joules(12.496537e6)),
            ),
        ]
        .into_iter()
        .collect()
    }

    fn transitions() -> IndexMap<String, Transition> {
        // D2 (780 nm) ends on 5P3/2 and D1 (795 nm) on 5P1/2
        [
            (
                "780",
                Transition::new(
                    RB87_S12,
                    RB87_P32,
                    1.0 / 26.244e-9,
                    TAU * 384.230484468562e9,
                ),
            ),
            (
                "795",
                Transition::new(
                    RB87_S12,
                    RB87_P12,
                    1.0 / 27.704e-9,
                    TAU * 377.170746354e9,
                ),
            ),
        ]
        .into_iter()
        .map(|(label, tr)| (label.to_string(), tr))
        .collect()
    }
}
