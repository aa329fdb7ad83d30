//! Closed-form hyperfine and Zeeman quantities derived from level data.
//!
//! Energies are in joules and fields in tesla. Conventions follow the usual
//! alkali-atom treatment: the magnetic interaction is
//! `mu_B (g_J J_z + g_I I_z) B`, so the weak-field shift of a sublevel is
//! `g_F mu_B m_F B`.

use crate::{
    atom::Atom,
    consts::MU_B,
    error::{ AtomResult, ConfigurationError, LookupError },
    level::{ Level, LevelData },
    spin::{ triangle, w6j, Spin, SpinProj, SpinTotal },
};

/// Hyperfine quantum numbers `F = |I - J|, ..., I + J` of a level, ascending.
pub fn f_values(i: SpinTotal, level: &Level) -> Vec<SpinTotal> {
    i.couple(level.j()).collect()
}

fn check_sublevel(level: &Level, i: SpinTotal, f: SpinTotal, mf: SpinProj)
    -> Result<(), ConfigurationError>
{
    if triangle(i, level.j(), f) && Spin::new(f.halves(), mf.halves()).is_some() {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidSublevel { level: *level, f, mf })
    }
}

fn check_manifold(level: &Level, i: SpinTotal, f: SpinTotal)
    -> Result<(), ConfigurationError>
{
    check_sublevel(level, i, f, SpinProj::new(f.halves() as i32))
}

/// Zero-field hyperfine shift of the `F` manifold relative to the level
/// centroid.
///
/// The quadrupole term is included only when the level carries a `B`
/// constant and both `I` and `J` are at least 1.
pub fn hyperfine_shift(level: &Level, data: &LevelData, i: SpinTotal, f: SpinTotal)
    -> f64
{
    let j = level.j();
    let k = f.casimir() - i.casimir() - j.casimir();
    let dipole = data.a_hfs * k / 2.0;
    let quadrupole
        = match data.b_hfs {
            Some(b) if i.halves() >= 2 && j.halves() >= 2 => {
                let (i_f, j_f) = (i.f(), j.f());
                b * (1.5 * k * (k + 1.0) - 2.0 * i.casimir() * j.casimir())
                    / (4.0 * i_f * (2.0 * i_f - 1.0) * j_f * (2.0 * j_f - 1.0))
            },
            _ => 0.0,
        };
    dipole + quadrupole
}

/// Hyperfine Landé factor `g_F`, including the nuclear contribution.
pub fn g_f(level: &Level, data: &LevelData, i: SpinTotal, f: SpinTotal) -> f64 {
    if f.halves() == 0 { return 0.0; }
    let ff = f.casimir();
    let ii = i.casimir();
    let jj = level.j().casimir();
    data.g_j * (ff - ii + jj) / (2.0 * ff)
        + data.g_i * (ff + ii - jj) / (2.0 * ff)
}

/// Energy of the `|F, m_F>` sublevel of a `J = 1/2` level in a field `field`,
/// relative to the level centroid, by the Breit-Rabi formula.
pub fn breit_rabi(
    level: &Level,
    data: &LevelData,
    i: SpinTotal,
    f: SpinTotal,
    mf: SpinProj,
    field: f64,
) -> Result<f64, ConfigurationError>
{
    if level.j().halves() != 1 {
        return Err(ConfigurationError::NotSpinHalf(*level));
    }
    check_sublevel(level, i, f, mf)?;
    let m = mf.f();
    let de = data.a_hfs * (i.f() + 0.5);
    if de == 0.0 {
        return Ok(g_f(level, data, i, f) * MU_B * m * field);
    }
    let two_i1 = 2.0 * i.f() + 1.0;
    let x = (data.g_j - data.g_i) * MU_B * field / de;
    let base = -de / (2.0 * two_i1) + data.g_i * MU_B * m * field;
    let upper = f.halves() > i.halves();
    if upper && mf.halves().unsigned_abs() == f.halves() {
        // stretched states: the square root has to be continued as 1 +/- x
        Ok(base + de / 2.0 * (1.0 + 2.0 * m * x / two_i1))
    } else {
        let sign = if upper { 1.0 } else { -1.0 };
        let root = (1.0 + 4.0 * m * x / two_i1 + x.powi(2)).sqrt();
        Ok(base + sign * de / 2.0 * root)
    }
}

/// Relative strength of the `F -> F'` hyperfine component of a `J -> J'`
/// line,
/// ```text
/// S_FF' = (2F' + 1) (2J + 1) { J  J'  1 }^2
///                            { F' F   I }
/// ```
/// normalized so that the sum over `F'` is 1.
pub fn hyperfine_strength(
    lower: &Level,
    upper: &Level,
    i: SpinTotal,
    f: SpinTotal,
    f_up: SpinTotal,
) -> f64 {
    let (j, j_up) = (lower.j(), upper.j());
    let w = w6j(j, j_up, SpinTotal::whole(1), f_up, f, i);
    f64::from(f_up.multiplicity()) * f64::from(j.multiplicity()) * w.powi(2)
}

impl Atom {
    /// Hyperfine quantum numbers available in an effective level.
    pub fn hyperfine_levels(&self, level: &Level)
        -> Result<Vec<SpinTotal>, LookupError>
    {
        self.level_data(level)?;
        Ok(f_values(self.nuclear_spin(), level))
    }

    /// Zero-field hyperfine shift [J] of a manifold.
    pub fn hyperfine_shift(&self, level: &Level, f: SpinTotal) -> AtomResult<f64> {
        let data = self.level_data(level)?;
        check_manifold(level, self.nuclear_spin(), f)?;
        Ok(hyperfine_shift(level, data, self.nuclear_spin(), f))
    }

    /// Landé factor of a manifold.
    pub fn g_f(&self, level: &Level, f: SpinTotal) -> AtomResult<f64> {
        let data = self.level_data(level)?;
        check_manifold(level, self.nuclear_spin(), f)?;
        Ok(g_f(level, data, self.nuclear_spin(), f))
    }

    /// First-order Zeeman shift [J] of a sublevel at the current field.
    pub fn zeeman_shift(&self, level: &Level, f: SpinTotal, mf: SpinProj)
        -> AtomResult<f64>
    {
        let data = self.level_data(level)?;
        check_sublevel(level, self.nuclear_spin(), f, mf)?;
        let g = g_f(level, data, self.nuclear_spin(), f);
        Ok(g * MU_B * mf.f() * self.field_strength())
    }

    /// Breit-Rabi energy [J] of a sublevel of a `J = 1/2` level at the
    /// current field.
    pub fn breit_rabi(&self, level: &Level, f: SpinTotal, mf: SpinProj)
        -> AtomResult<f64>
    {
        let data = self.level_data(level)?;
        let e = breit_rabi(
            level, data, self.nuclear_spin(), f, mf, self.field_strength())?;
        Ok(e)
    }

    /// Relative strength of the `F -> F'` component of a labeled transition.
    pub fn hyperfine_strength(&self, label: &str, f: SpinTotal, f_up: SpinTotal)
        -> AtomResult<f64>
    {
        let tr = self.transition(label)?;
        check_manifold(&tr.lower, self.nuclear_spin(), f)?;
        check_manifold(&tr.upper, self.nuclear_spin(), f_up)?;
        Ok(hyperfine_strength(&tr.lower, &tr.upper, self.nuclear_spin(), f, f_up))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use rand::Rng;
    use crate::{
        atom::LevelFilter,
        consts::{ joules_to_hz, H },
        error::AtomError,
        species::{ Rb87, Species, RB87_P12, RB87_P32, RB87_S12 },
    };

    fn rb87() -> Atom { Rb87::atom(None, LevelFilter::All).unwrap() }

    fn st(halves: u32) -> SpinTotal { SpinTotal::new(halves) }

    #[test]
    fn manifolds() {
        let atom = rb87();
        assert_eq!(atom.hyperfine_levels(&RB87_S12).unwrap(), vec![st(2), st(4)]);
        assert_eq!(atom.hyperfine_levels(&RB87_P12).unwrap(), vec![st(2), st(4)]);
        assert_eq!(
            atom.hyperfine_levels(&RB87_P32).unwrap(),
            vec![st(0), st(2), st(4), st(6)],
        );
    }

    #[test]
    fn ground_state_splitting() {
        let atom = rb87();
        let split
            = atom.hyperfine_shift(&RB87_S12, st(4)).unwrap()
            - atom.hyperfine_shift(&RB87_S12, st(2)).unwrap();
        assert_approx_eq!(joules_to_hz(split) * 1e-6, 6834.682610904, 1e-3);
    }

    #[test]
    fn shifts_have_zero_centroid() {
        let atom = rb87();
        for level in atom.levels() {
            let centroid: f64
                = atom.hyperfine_levels(&level).unwrap().into_iter()
                .map(|f| {
                    f64::from(f.multiplicity())
                        * atom.hyperfine_shift(&level, f).unwrap()
                })
                .sum();
            assert!(joules_to_hz(centroid).abs() < 1.0, "{level}: {centroid}");
        }
    }

    #[test]
    fn p32_top_manifold() {
        let atom = rb87();
        let shift = atom.hyperfine_shift(&RB87_P32, st(6)).unwrap();
        let expected = (2.25 * 84.4717530e6 + 0.25 * 12.496537e6) * H;
        assert_approx_eq!(shift / H, expected / H, 1e-3);
    }

    #[test]
    fn invalid_manifold() {
        let atom = rb87();
        assert!(matches!(
            atom.hyperfine_shift(&RB87_S12, st(6)),
            Err(AtomError::Configuration(ConfigurationError::InvalidSublevel { .. })),
        ));
    }

    #[test]
    fn lande_factors() {
        let atom = rb87();
        assert_approx_eq!(atom.g_f(&RB87_S12, st(4)).unwrap(), 0.49999, 1e-3);
        assert_approx_eq!(atom.g_f(&RB87_S12, st(2)).unwrap(), -0.50182, 1e-3);
        assert_approx_eq!(atom.g_f(&RB87_P32, st(6)).unwrap(), 0.66763, 1e-4);
        assert_eq!(atom.g_f(&RB87_P32, st(0)).unwrap(), 0.0);
    }

    #[test]
    fn breit_rabi_zero_field() {
        let atom = rb87();
        for f in atom.hyperfine_levels(&RB87_S12).unwrap() {
            let e0 = atom.hyperfine_shift(&RB87_S12, f).unwrap();
            for spin in f {
                let e = atom.breit_rabi(&RB87_S12, f, spin.proj()).unwrap();
                assert_approx_eq!(e / H, e0 / H, 1e-3);
            }
        }
    }

    #[test]
    fn breit_rabi_weak_field_is_linear() {
        let atom = rb87().with_field_strength(1e-7).unwrap();
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let f = if rng.gen::<bool>() { st(4) } else { st(2) };
            let mf = SpinProj::new(
                2 * rng.gen_range(0..f.multiplicity() as i32) - f.halves() as i32);
            let e = atom.breit_rabi(&RB87_S12, f, mf).unwrap()
                - atom.hyperfine_shift(&RB87_S12, f).unwrap();
            let linear = atom.zeeman_shift(&RB87_S12, f, mf).unwrap();
            // 1 mG: shifts ~ 700 Hz, quadratic part ~ 1e-4 Hz
            assert_approx_eq!(e / H, linear / H, 1e-2);
        }
    }

    #[test]
    fn breit_rabi_strong_field_stretched_is_linear() {
        // the stretched state has no quadratic shift at any field
        let data = Rb87::levels()[&RB87_S12];
        let i = Rb87::NUCLEAR_SPIN;
        let f = st(4);
        let mf = SpinProj::new(4);
        let b = 0.5;
        let e = breit_rabi(&RB87_S12, &data, i, f, mf, b).unwrap();
        let e0 = hyperfine_shift(&RB87_S12, &data, i, f);
        let g = g_f(&RB87_S12, &data, i, f);
        assert_approx_eq!((e - e0) / H, g * MU_B * 2.0 * b / H, 1.0);
    }

    #[test]
    fn breit_rabi_requires_spin_half() {
        let atom = rb87();
        assert!(matches!(
            atom.breit_rabi(&RB87_P32, st(6), SpinProj::new(0)),
            Err(AtomError::Configuration(ConfigurationError::NotSpinHalf(_))),
        ));
        assert!(matches!(
            atom.breit_rabi(&RB87_S12, st(2), SpinProj::new(4)),
            Err(AtomError::Configuration(ConfigurationError::InvalidSublevel { .. })),
        ));
    }

    #[test]
    fn d2_strengths() {
        let atom = rb87();
        let s = |f, f_up| atom.hyperfine_strength("780", st(f), st(f_up)).unwrap();
        assert_approx_eq!(s(4, 6), 7.0 / 10.0, 1e-12);
        assert_approx_eq!(s(4, 4), 1.0 / 4.0, 1e-12);
        assert_approx_eq!(s(4, 2), 1.0 / 20.0, 1e-12);
        assert_approx_eq!(s(2, 4), 5.0 / 12.0, 1e-12);
        assert_approx_eq!(s(2, 2), 5.0 / 12.0, 1e-12);
        assert_approx_eq!(s(2, 0), 1.0 / 6.0, 1e-12);
    }

    #[test]
    fn strengths_sum_to_one() {
        let atom = rb87();
        for (label, tr) in atom.transitions() {
            for f in atom.hyperfine_levels(&tr.lower).unwrap() {
                let total: f64
                    = atom.hyperfine_levels(&tr.upper).unwrap().into_iter()
                    .map(|f_up| atom.hyperfine_strength(label, f, f_up).unwrap())
                    .sum();
                assert_approx_eq!(total, 1.0, 1e-12);
            }
        }
    }

    #[test]
    fn forbidden_strength_is_zero() {
        let atom = rb87();
        // F = 1 -> F' = 3 violates |dF| <= 1
        let s = atom.hyperfine_strength("780", st(2), st(6)).unwrap();
        assert!(s.abs() < 1e-15);
    }

    #[test]
    fn filtered_level_lookup_fails() {
        let atom = Rb87::atom(None, LevelFilter::only([RB87_S12])).unwrap();
        assert!(matches!(
            atom.hyperfine_levels(&RB87_P32),
            Err(LookupError::Level(_)),
        ));
    }
}
