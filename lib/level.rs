//! Electronic fine-structure levels, their coupling constants, and the optical
//! transitions between them.

use std::{ f64::consts::{ PI, TAU }, fmt, str::FromStr, sync::OnceLock };
use regex::Regex;
use crate::{
    consts::{ C, HBAR },
    error::ConfigurationError,
    spin::{ triangle, SpinTotal },
};

const ORBITAL_LETTERS: [char; 8] = ['S', 'P', 'D', 'F', 'G', 'H', 'I', 'K'];

/// A single fine-structure level, identified by `(n, S, L, J)`.
///
/// Levels have value semantics and are used as map keys: two levels with equal
/// quantum numbers are interchangeable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Level {
    n: u32,
    s: SpinTotal,
    l: u32,
    j: SpinTotal,
}

impl Level {
    /// Create a new level, checking that `n > 0` and that `J` can be formed
    /// from `L` and `S`.
    pub fn new(n: u32, s: SpinTotal, l: u32, j: SpinTotal)
        -> Result<Self, ConfigurationError>
    {
        let invalid = |reason: &'static str| {
            ConfigurationError::InvalidLevel { n, s, l, j, reason }
        };
        if n == 0 {
            return Err(invalid("n must be positive"));
        }
        if !triangle(SpinTotal::whole(l), s, j) {
            return Err(invalid("J must satisfy |L - S| <= J <= L + S"));
        }
        Ok(Self { n, s, l, j })
    }

    /// Create a level without checking its quantum numbers.
    ///
    /// Used for compile-time level tables; every such table is covered by a
    /// test passing its levels back through [`Self::new`].
    pub(crate) const fn new_unchecked(n: u32, s: SpinTotal, l: u32, j: SpinTotal)
        -> Self
    {
        Self { n, s, l, j }
    }

    /// Principal quantum number.
    pub fn n(&self) -> u32 { self.n }

    /// Total electron spin.
    pub fn s(&self) -> SpinTotal { self.s }

    /// Orbital angular momentum.
    pub fn l(&self) -> u32 { self.l }

    /// Total electronic angular momentum.
    pub fn j(&self) -> SpinTotal { self.j }

    /// Spectroscopic letter for the orbital angular momentum, if `L` is small
    /// enough to have one.
    pub fn orbital_letter(&self) -> Option<char> {
        ORBITAL_LETTERS.get(self.l as usize).copied()
    }

    /// Return `true` if the level can carry an electric-quadrupole hyperfine
    /// constant, i.e. `J >= 1`.
    pub fn supports_quadrupole(&self) -> bool { self.j.halves() >= 2 }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.n)?;
        if self.s.halves() != 1 {
            write!(f, "^{}", self.s.multiplicity())?;
        }
        match self.orbital_letter() {
            Some(letter) => write!(f, "{}", letter)?,
            None => write!(f, "[L={}]", self.l)?,
        }
        write!(f, "{}", self.j)
    }
}

fn level_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?P<n>\d+)(?:\^(?P<mult>\d+))?(?P<l>[SPDFGHIK])(?P<j>\d+)(?P<half>/2)?$"
        )
        .expect("level notation regex is valid")
    })
}

impl FromStr for Level {
    type Err = ConfigurationError;

    /// Parse spectroscopic notation such as `5S1/2`, `5P3/2`, or `5^3P1`.
    ///
    /// The spin multiplicity `2S + 1` defaults to 2 when omitted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || ConfigurationError::ParseLevel(s.to_string());
        let caps = level_regex().captures(s.trim()).ok_or_else(bad)?;
        let n: u32 = caps["n"].parse().map_err(|_| bad())?;
        let mult: u32
            = caps.name("mult")
            .map(|m| m.as_str().parse())
            .transpose()
            .map_err(|_| bad())?
            .unwrap_or(2);
        if mult == 0 {
            return Err(bad());
        }
        let l = ORBITAL_LETTERS.iter()
            .position(|c| caps["l"].starts_with(*c))
            .ok_or_else(bad)? as u32;
        let j_num: u32 = caps["j"].parse().map_err(|_| bad())?;
        let j
            = if caps.name("half").is_some() {
                if j_num % 2 == 0 { return Err(bad()); }
                SpinTotal::new(j_num)
            } else {
                SpinTotal::whole(j_num)
            };
        Level::new(n, SpinTotal::new(mult - 1), l, j)
    }
}

/// Hyperfine and Zeeman coupling constants for a single [`Level`].
///
/// Hyperfine constants are energies in joules.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LevelData {
    /// Magnetic-dipole hyperfine constant.
    pub a_hfs: f64,
    /// Electric-quadrupole hyperfine constant, only for levels with `J >= 1`.
    pub b_hfs: Option<f64>,
    /// Electronic g-factor.
    pub g_j: f64,
    /// Nuclear g-factor.
    pub g_i: f64,
}

impl LevelData {
    /// Create level data with no quadrupole constant.
    pub fn new(a_hfs: f64, g_j: f64, g_i: f64) -> Self {
        Self { a_hfs, b_hfs: None, g_j, g_i }
    }

    /// Attach an electric-quadrupole hyperfine constant.
    pub fn with_quadrupole(mut self, b_hfs: f64) -> Self {
        self.b_hfs = Some(b_hfs);
        self
    }
}

/// An allowed optical transition between two levels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transition {
    pub lower: Level,
    pub upper: Level,
    /// Einstein A coefficient (inverse lifetime) [1 / s].
    pub a: f64,
    /// Transition frequency [rad / s].
    pub freq: f64,
}

impl Transition {
    pub fn new(lower: Level, upper: Level, a: f64, freq: f64) -> Self {
        Self { lower, upper, a, freq }
    }

    /// Transition frequency [Hz].
    pub fn frequency_hz(&self) -> f64 { self.freq / TAU }

    /// Vacuum wavelength [m].
    pub fn wavelength(&self) -> f64 { C / self.frequency_hz() }

    /// Excited-state lifetime [s].
    pub fn lifetime(&self) -> f64 { 1.0 / self.a }

    /// Natural linewidth (FWHM) [Hz].
    pub fn linewidth_hz(&self) -> f64 { self.a / TAU }

    /// Two-level saturation intensity `hbar w^3 A / (12 pi c^2)` [W / m^2].
    pub fn saturation_intensity(&self) -> f64 {
        HBAR * self.freq.powi(3) * self.a / (12.0 * PI * C.powi(2))
    }

    /// Return `true` if `level` is one of the transition's endpoints.
    pub fn involves(&self, level: &Level) -> bool {
        self.lower == *level || self.upper == *level
    }
}
