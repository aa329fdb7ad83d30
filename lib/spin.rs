//! Definitions for angular momentum quantum numbers and related quantities.

use std::fmt;
use wigner_symbols::Wigner6j;

/// A single spin-projection quantum number.
///
/// This type is backed by a single `i32` representing the number of halves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpinProj(i32);

impl SpinProj {
    /// Create a new spin projection from a number of halves.
    pub const fn new(m: i32) -> Self { Self(m) }

    /// Return `self` as a bare number of halves.
    pub fn halves(self) -> i32 { self.0 }

    /// Return `self` as an `f64`.
    ///
    /// This reflects the "true" value of the projection quantum number; i.e.
    /// there is a relative factor of 2 between this and [`Self::halves`].
    pub fn f(self) -> f64 { f64::from(self.0) / 2.0 }

    /// Create a new spin-projection quantum number from a `f64` value, rounding
    /// to the nearest half-integer.
    pub fn from_f64(f: f64) -> Self { Self((2.0 * f).round() as i32) }
}

impl From<SpinProj> for f64 {
    fn from(m: SpinProj) -> Self { m.f() }
}

impl fmt::Display for SpinProj {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % 2 == 0 {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}/2", self.0)
        }
    }
}

/// A single total-spin quantum number.
///
/// Like [`SpinProj`], this is stored as a number of halves so that both
/// integer and half-integer values are exact.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpinTotal(u32);

impl SpinTotal {
    /// Create a new total spin from a number of halves.
    pub const fn new(j: u32) -> Self { Self(j) }

    /// Create a new total spin from a whole number.
    pub const fn whole(j: u32) -> Self { Self(2 * j) }

    /// Return `self` as a bare number of halves.
    pub fn halves(self) -> u32 { self.0 }

    /// Return `self` as an `f64`.
    ///
    /// This reflects the "true" numerical value of the total-spin quantum
    /// number; i.e. there is a relative factor of 2 between this and
    /// [`Self::halves`].
    pub fn f(self) -> f64 { f64::from(self.0) / 2.0 }

    /// Create a new total-spin quantum number from a `f64` value, rounding
    /// to the nearest half-integer.
    ///
    /// Negative inputs are passed through [`f64::abs`] before rounding.
    pub fn from_f64(f: f64) -> Self { Self((2.0 * f.abs()).round() as u32) }

    /// Return `j(j + 1)`.
    pub fn casimir(self) -> f64 {
        let j = self.f();
        j * (j + 1.0)
    }

    /// Return the multiplicity `2j + 1`.
    pub fn multiplicity(self) -> u32 { self.0 + 1 }

    /// Return `true` if `self` is an integer.
    pub fn is_integer(self) -> bool { self.0 % 2 == 0 }

    /// Return an iterator over available [`Spin`] pairs by ascending projection
    /// number.
    pub fn iter(self) -> SpinProjections {
        SpinProjections { total: self, next: Some(-(self.0 as i32)) }
    }

    /// Return an iterator over all totals reachable by coupling `self` with
    /// `other`, i.e. `|a - b|, ..., a + b`, in ascending order.
    pub fn couple(self, other: Self) -> impl Iterator<Item = Self> {
        let lo = self.0.abs_diff(other.0);
        let hi = self.0 + other.0;
        (lo..=hi).step_by(2).map(Self)
    }
}

impl IntoIterator for SpinTotal {
    type IntoIter = SpinProjections;
    type Item = Spin;

    fn into_iter(self) -> Self::IntoIter { self.iter() }
}

impl From<SpinTotal> for f64 {
    fn from(j: SpinTotal) -> Self { j.f() }
}

impl fmt::Display for SpinTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.0 / 2)
        } else {
            write!(f, "{}/2", self.0)
        }
    }
}

/// Return `true` if `a`, `b`, and `c` satisfy the triangle rule for angular
/// momentum addition, `|a - b| <= c <= a + b` with `a + b + c` integral.
pub fn triangle(a: SpinTotal, b: SpinTotal, c: SpinTotal) -> bool {
    a.0.abs_diff(b.0) <= c.0
        && c.0 <= a.0 + b.0
        && (a.0 + b.0 + c.0) % 2 == 0
}

/// A `(total, projection)` spin quantum number pair.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Spin(SpinTotal, SpinProj);

impl Spin {
    /// Create a new spin if the given spin-projection number is valid for the
    /// given total-spin number.
    pub fn new(j: u32, m: i32) -> Option<Self> {
        let j_i64 = i64::from(j);
        let m_i64 = i64::from(m);
        (
            (-j_i64..=j_i64).contains(&m_i64)
            && (m_i64 - j_i64) % 2 == 0
        )
        .then_some(Self(SpinTotal(j), SpinProj(m)))
    }

    /// Return the [total-spin][SpinTotal] quantum number.
    pub fn total(self) -> SpinTotal { self.0 }

    /// Return the [spin-projection][SpinProj] quantum number.
    pub fn proj(self) -> SpinProj { self.1 }

    /// Return `true` if the projection number saturates the range of available
    /// spin values.
    pub fn is_stretched(self) -> bool {
        i64::from(self.1.0).abs() >= i64::from(self.0.0)
    }

    /// Return `self` as a bare pair of halves.
    pub fn halves(self) -> (u32, i32) { (self.0.halves(), self.1.halves()) }

    /// Return `self` as a `(f64, f64)`.
    pub fn f(self) -> (f64, f64) { (self.0.f(), self.1.f()) }
}

impl From<Spin> for (f64, f64) {
    fn from(jm: Spin) -> Self { jm.f() }
}

/// Iterator over spin projection states for a fixed total spin magnitude.
///
/// Projection states are visited in ascending order.
#[derive(Copy, Clone, Debug)]
pub struct SpinProjections {
    total: SpinTotal,
    next: Option<i32>,
}

impl Iterator for SpinProjections {
    type Item = Spin;

    fn next(&mut self) -> Option<Self::Item> {
        let m = self.next?;
        let j = self.total.0 as i32;
        self.next = (m < j).then_some(m + 2);
        Some(Spin(self.total, SpinProj(m)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.next
            .map(|m| ((self.total.0 as i32 - m) / 2 + 1) as usize)
            .unwrap_or(0);
        (n, Some(n))
    }
}

impl ExactSizeIterator for SpinProjections { }

/// Calculate the appropriate Wigner 6j symbol for total spins (by row)
/// `j00..j12`.
pub fn w6j<J00, J01, J02, J10, J11, J12>(
    j00: J00,
    j01: J01,
    j02: J02,
    j10: J10,
    j11: J11,
    j12: J12,
) -> f64
where
    J00: Into<SpinTotal>,
    J01: Into<SpinTotal>,
    J02: Into<SpinTotal>,
    J10: Into<SpinTotal>,
    J11: Into<SpinTotal>,
    J12: Into<SpinTotal>,
{
    Wigner6j {
        tj1: j00.into().halves() as i32,
        tj2: j01.into().halves() as i32,
        tj3: j02.into().halves() as i32,
        tj4: j10.into().halves() as i32,
        tj5: j11.into().halves() as i32,
        tj6: j12.into().halves() as i32,
    }
    .value()
    .into()
}
