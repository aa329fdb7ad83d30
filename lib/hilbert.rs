//! Definitions to describe basis states and bases built from an [`Atom`].

use std::{ hash::Hash, ops::Deref };
use indexmap::IndexMap;
use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::{ One, Zero };
use crate::{
    atom::Atom,
    consts::{ HBAR, MU_B },
    hyperfine,
    level::Level,
    spin::{ Spin, SpinProj, SpinTotal },
};

/* States *********************************************************************/

/// A single basis state.
pub trait BasisState: Clone + Eq + Hash + std::fmt::Debug {
    /// Return `true` if two states can be coupled by a stimulated electric
    /// dipole transition.
    ///
    /// This method should be symmetric in its inputs.
    fn couples_to(&self, other: &Self) -> bool;
}

/// Extends [`BasisState`] to include spin state properties.
pub trait SpinState: BasisState {
    /// Get the [`Spin`] of the basis state.
    fn spin(&self) -> Spin;
}

/// A single hyperfine sublevel `|level, F, m_F>`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HyperfineState {
    pub level: Level,
    pub spin: Spin,
}

impl HyperfineState {
    pub fn new(level: Level, spin: Spin) -> Self { Self { level, spin } }

    /// Hyperfine total angular momentum `F`.
    pub fn f(&self) -> SpinTotal { self.spin.total() }

    /// Projection `m_F`.
    pub fn mf(&self) -> SpinProj { self.spin.proj() }
}

impl BasisState for HyperfineState {
    fn couples_to(&self, other: &Self) -> bool {
        let (f1, m1) = self.spin.halves();
        let (f2, m2) = other.spin.halves();
        self.level.l().abs_diff(other.level.l()) == 1
            && f1.abs_diff(f2) <= 2
            && !(f1 == 0 && f2 == 0)
            && m1.abs_diff(m2) <= 2
    }
}

impl SpinState for HyperfineState {
    fn spin(&self) -> Spin { self.spin }
}

/* Bases **********************************************************************/

/// A collection of unique [`BasisState`]s with associated energies in units of
/// angular frequency.
///
/// This collection is backed by a single [`IndexMap`], which can be accessed
/// via [`AsRef`] and [`Deref`].
#[derive(Clone, Debug, PartialEq)]
pub struct Basis<S>
where S: Clone + Eq + Hash
{
    energies: IndexMap<S, f64>,
}

impl<S> AsRef<IndexMap<S, f64>> for Basis<S>
where S: Clone + Eq + Hash
{
    fn as_ref(&self) -> &IndexMap<S, f64> { &self.energies }
}

impl<S> Deref for Basis<S>
where S: Clone + Eq + Hash
{
    type Target = IndexMap<S, f64>;

    fn deref(&self) -> &Self::Target { &self.energies }
}

impl<S> Default for Basis<S>
where S: Clone + Eq + Hash
{
    fn default() -> Self { Self { energies: IndexMap::default() } }
}

impl<S> FromIterator<(S, f64)> for Basis<S>
where S: Clone + Eq + Hash
{
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = (S, f64)>
    {
        Self { energies: iter.into_iter().collect() }
    }
}

impl<S> Basis<S>
where S: Clone + Eq + Hash
{
    /// Create a new, empty basis.
    pub fn new() -> Self { Self::default() }

    /// Number of states in the basis.
    pub fn num_states(&self) -> usize { self.energies.len() }

    /// Get the energy in units of angular frequency of a particular basis
    /// state.
    pub fn get_energy(&self, state: &S) -> Option<f64> {
        self.energies.get(state).copied()
    }

    /// Get the energy in units of angular frequency of a particular basis state
    /// by index.
    pub fn get_energy_index(&self, index: usize) -> Option<f64> {
        self.energies.get_index(index).map(|(_, e)| e).copied()
    }

    /// Get an array representation of a particular basis state.
    ///
    /// The array is sized to match the number of states currently in `self`.
    pub fn get_vector(&self, state: &S) -> Option<nd::Array1<C64>> {
        self.energies.get_index_of(state)
            .and_then(|k| self.get_vector_index(k))
    }

    /// Get an array representation of a particular basis state by index.
    ///
    /// The array is sized to match the number of states currently in `self`.
    pub fn get_vector_index(&self, index: usize) -> Option<nd::Array1<C64>> {
        let n = self.energies.len();
        (index < n).then(|| {
            (0..n).map(|j| if j == index { C64::one() } else { C64::zero() })
                .collect()
        })
    }

    /// Return every pair of state indices `(i, j)`, `i < j`, whose states
    /// couple under [`BasisState::couples_to`].
    pub fn couplings(&self) -> Vec<(usize, usize)>
    where S: BasisState
    {
        let states: Vec<&S> = self.energies.keys().collect();
        (0..states.len())
            .flat_map(|i| (i + 1..states.len()).map(move |j| (i, j)))
            .filter(|&(i, j)| states[i].couples_to(states[j]))
            .collect()
    }
}

impl Atom {
    /// Energy offset [rad / s] of an effective level relative to the ground
    /// level.
    ///
    /// Levels connected to the ground level by an active transition sit at
    /// the transition frequency; all others, including the ground level,
    /// are placed at zero.
    pub fn level_offset(&self, level: &Level) -> f64 {
        let ground = self.ground_level();
        self.active_transitions()
            .find(|(_, tr)| Some(tr.lower) == ground && tr.upper == *level)
            .map(|(_, tr)| tr.freq)
            .unwrap_or(0.0)
    }

    /// Build the basis of hyperfine sublevels of every effective level, in
    /// table order and ascending `(F, m_F)`.
    ///
    /// Energies are in units of angular frequency and include the level
    /// offset, the zero-field hyperfine shift, and the first-order Zeeman
    /// shift at the current field.
    pub fn hyperfine_basis(&self) -> Basis<HyperfineState> {
        let i = self.nuclear_spin();
        let field = self.field_strength();
        let mut energies: IndexMap<HyperfineState, f64> = IndexMap::new();
        for (level, data) in self.effective_levels() {
            let offset = self.level_offset(level);
            for f in hyperfine::f_values(i, level) {
                let e_hfs = hyperfine::hyperfine_shift(level, data, i, f) / HBAR;
                let g = hyperfine::g_f(level, data, i, f);
                for spin in f {
                    let zm = g * MU_B * spin.proj().f() * field / HBAR;
                    energies.insert(
                        HyperfineState::new(*level, spin),
                        offset + e_hfs + zm,
                    );
                }
            }
        }
        Basis { energies }
    }
}
