//! The validated per-isotope descriptor handed to atomic-structure solvers.

use indexmap::IndexMap;
use itertools::Itertools;
use rustc_hash::FxHashSet;
use tracing::{ debug, trace };
use crate::{
    error::{ ConfigurationError, LookupError },
    level::{ Level, LevelData, Transition },
    spin::SpinTotal,
};

/// Restriction on which levels of a table a solver should include.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LevelFilter {
    /// Use every level in the table.
    #[default]
    All,
    /// Use only the listed levels.
    Only(FxHashSet<Level>),
}

impl LevelFilter {
    /// Create a filter admitting only the given levels.
    pub fn only<I>(levels: I) -> Self
    where I: IntoIterator<Item = Level>
    {
        Self::Only(levels.into_iter().collect())
    }

    /// Return `true` if `level` passes the filter.
    pub fn admits(&self, level: &Level) -> bool {
        match self {
            Self::All => true,
            Self::Only(levels) => levels.contains(level),
        }
    }
}

impl FromIterator<Level> for LevelFilter {
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = Level>
    {
        Self::only(iter)
    }
}

/// Raw, unvalidated tables for a single isotope.
///
/// Pass to [`Atom::new`] to obtain a validated descriptor.
#[derive(Clone, Debug, PartialEq)]
pub struct AtomSpec {
    pub name: String,
    pub nuclear_spin: SpinTotal,
    /// Nuclear g-factor; every entry of `levels` must carry this exact value.
    pub g_i: f64,
    pub levels: IndexMap<Level, LevelData>,
    pub transitions: IndexMap<String, Transition>,
}

/// Validated, self-consistent table of atomic constants for one isotope.
///
/// Apart from the magnetic field, which is changed only through
/// [`Self::set_field_strength`], an `Atom` is immutable after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Atom {
    name: String,
    nuclear_spin: SpinTotal,
    g_i: f64,
    levels: IndexMap<Level, LevelData>,
    transitions: IndexMap<String, Transition>,
    field: f64,
    filter: LevelFilter,
}

fn check_field(field: f64) -> Result<f64, ConfigurationError> {
    if !field.is_finite() {
        Err(ConfigurationError::NonFiniteField(field))
    } else if field < 0.0 {
        Err(ConfigurationError::NegativeField(field))
    } else {
        Ok(field)
    }
}

fn check_levels(spec: &AtomSpec) -> Result<(), ConfigurationError> {
    if spec.levels.is_empty() {
        return Err(ConfigurationError::EmptyLevelTable);
    }
    for (level, data) in spec.levels.iter() {
        if data.g_i != spec.g_i {
            return Err(ConfigurationError::NuclearGFactorMismatch {
                level: *level,
                expected: spec.g_i,
                found: data.g_i,
            });
        }
        if level.supports_quadrupole() {
            if data.b_hfs.is_none() {
                return Err(ConfigurationError::MissingQuadrupole(*level));
            }
        } else if matches!(data.b_hfs, Some(b) if b != 0.0) {
            return Err(ConfigurationError::ForbiddenQuadrupole(*level));
        }
        trace!(level = %level, ?data, "level ok");
    }
    Ok(())
}

fn check_transitions(spec: &AtomSpec) -> Result<(), ConfigurationError> {
    for (label, tr) in spec.transitions.iter() {
        for level in [tr.lower, tr.upper] {
            if !spec.levels.contains_key(&level) {
                return Err(ConfigurationError::UnknownTransitionLevel {
                    label: label.clone(),
                    level,
                });
            }
        }
        if tr.lower == tr.upper {
            return Err(ConfigurationError::DegenerateTransition {
                label: label.clone(),
                level: tr.lower,
            });
        }
        let rates = [("Einstein A coefficient", tr.a), ("frequency", tr.freq)];
        for (what, value) in rates {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigurationError::InvalidTransitionRate {
                    label: label.clone(),
                    what,
                    value,
                });
            }
        }
        trace!(label = %label, lower = %tr.lower, upper = %tr.upper, "transition ok");
    }
    Ok(())
}

fn check_filter(spec: &AtomSpec, filter: &LevelFilter)
    -> Result<(), ConfigurationError>
{
    if let LevelFilter::Only(levels) = filter {
        if levels.is_empty() {
            return Err(ConfigurationError::EmptyLevelFilter);
        }
        if let Some(unknown)
            = levels.iter().sorted().find(|l| !spec.levels.contains_key(*l))
        {
            return Err(ConfigurationError::UnknownFilterLevel(*unknown));
        }
    }
    Ok(())
}

impl Atom {
    /// Validate `spec` and construct a new descriptor.
    ///
    /// `field` is the magnetic field magnitude in tesla; `None` means
    /// field-free. Construction either succeeds with every invariant in place
    /// or fails with the first violation found.
    pub fn new(spec: AtomSpec, field: Option<f64>, filter: LevelFilter)
        -> Result<Self, ConfigurationError>
    {
        let field = check_field(field.unwrap_or(0.0))?;
        check_levels(&spec)?;
        check_transitions(&spec)?;
        check_filter(&spec, &filter)?;
        let atom = Self {
            name: spec.name,
            nuclear_spin: spec.nuclear_spin,
            g_i: spec.g_i,
            levels: spec.levels,
            transitions: spec.transitions,
            field,
            filter,
        };
        debug!(
            species = %atom.name,
            levels = %atom.levels().iter().join(", "),
            transitions = %atom.transitions.keys().join(", "),
            field = atom.field,
            "constructed atom"
        );
        Ok(atom)
    }

    /// Name of the isotope.
    pub fn name(&self) -> &str { &self.name }

    /// Nuclear spin `I`.
    pub fn nuclear_spin(&self) -> SpinTotal { self.nuclear_spin }

    /// Nuclear g-factor shared by all levels.
    pub fn g_i(&self) -> f64 { self.g_i }

    /// Magnetic field magnitude [T].
    pub fn field_strength(&self) -> f64 { self.field }

    /// Replace the magnetic field magnitude [T].
    ///
    /// Any solver state computed at the previous field is stale after this
    /// call; recomputing it is the solver's job.
    pub fn set_field_strength(&mut self, field: f64)
        -> Result<(), ConfigurationError>
    {
        let field = check_field(field)?;
        debug!(species = %self.name, old = self.field, new = field, "field changed");
        self.field = field;
        Ok(())
    }

    /// Return a copy of `self` at a different magnetic field [T].
    pub fn with_field_strength(&self, field: f64)
        -> Result<Self, ConfigurationError>
    {
        let mut new = self.clone();
        new.set_field_strength(field)?;
        Ok(new)
    }

    /// The level filter given at construction.
    pub fn filter(&self) -> &LevelFilter { &self.filter }

    /// Return `true` if `level` is in the effective level set.
    pub fn contains_level(&self, level: &Level) -> bool {
        self.filter.admits(level) && self.levels.contains_key(level)
    }

    /// Effective levels after applying the filter, in table order.
    pub fn levels(&self) -> Vec<Level> {
        self.levels.keys()
            .filter(|level| self.filter.admits(level))
            .copied()
            .collect()
    }

    /// Effective levels paired with their coupling constants, in table order.
    pub(crate) fn effective_levels(&self)
        -> impl Iterator<Item = (&Level, &LevelData)> + '_
    {
        self.levels.iter().filter(|(level, _)| self.filter.admits(level))
    }

    /// Coupling constants for a level in the effective set.
    pub fn level_data(&self, level: &Level) -> Result<&LevelData, LookupError> {
        self.levels.get(level)
            .filter(|_| self.filter.admits(level))
            .ok_or(LookupError::Level(*level))
    }

    /// The full label-to-transition table.
    pub fn transitions(&self) -> &IndexMap<String, Transition> {
        &self.transitions
    }

    /// Look up a single transition by label.
    pub fn transition(&self, label: &str) -> Result<&Transition, LookupError> {
        self.transitions.get(label)
            .ok_or_else(|| LookupError::Transition(label.to_string()))
    }

    /// Transitions whose both levels are in the effective set.
    pub fn active_transitions(&self)
        -> impl Iterator<Item = (&str, &Transition)> + '_
    {
        self.transitions.iter()
            .filter(|(_, tr)| {
                self.filter.admits(&tr.lower) && self.filter.admits(&tr.upper)
            })
            .map(|(label, tr)| (label.as_str(), tr))
    }

    /// The first effective level that is not the upper level of any active
    /// transition.
    pub fn ground_level(&self) -> Option<Level> {
        let uppers: FxHashSet<Level>
            = self.active_transitions().map(|(_, tr)| tr.upper).collect();
        let levels = self.levels();
        levels.iter()
            .find(|level| !uppers.contains(*level))
            .or_else(|| levels.first())
            .copied()
    }
}
