use std::f64::consts::PI;
use assert_approx_eq::assert_approx_eq;
use rand::Rng;
use atomic_species::{
    species::{ RB87_GROUND, RB87_P12, RB87_P32, RB87_S12 },
    spin::SpinTotal,
    ConfigurationError,
    Level,
    LevelFilter,
    LookupError,
    Rb87,
    Species,
};

fn rel_close(a: f64, b: f64, tol: f64) -> bool { ((a - b) / b).abs() <= tol }

#[test]
fn unfiltered_table() {
    let atom = Rb87::atom(None, LevelFilter::All).unwrap();
    assert_eq!(atom.levels(), vec![RB87_S12, RB87_P12, RB87_P32]);
    assert_eq!(atom.levels()[0], RB87_GROUND);
    let labels: Vec<&str> = atom.transitions().keys().map(String::as_str).collect();
    assert_eq!(labels, vec!["780", "795"]);
}

#[test]
fn d_line_constants() {
    let atom = Rb87::atom(None, LevelFilter::All).unwrap();
    let d2 = atom.transition("780").unwrap();
    assert!(rel_close(d2.freq, 2.0 * PI * 384.230484468562e9, 1e-6));
    assert!(rel_close(d2.a, 1.0 / 26.244e-9, 1e-6));
    let d1 = atom.transition("795").unwrap();
    assert!(rel_close(d1.freq, 2.0 * PI * 377.170746354e9, 1e-6));
    assert!(rel_close(d1.a, 1.0 / 27.704e-9, 1e-6));
}

#[test]
fn transitions_reference_known_levels() {
    let atom = Rb87::atom(None, LevelFilter::All).unwrap();
    let levels = atom.levels();
    for tr in atom.transitions().values() {
        assert!(levels.contains(&tr.lower));
        assert!(levels.contains(&tr.upper));
        assert!(tr.freq > 0.0);
    }
}

#[test]
fn nuclear_g_factor_is_uniform() {
    let atom = Rb87::atom(None, LevelFilter::All).unwrap();
    let g_is: Vec<f64>
        = atom.levels().iter()
        .map(|level| atom.level_data(level).unwrap().g_i)
        .collect();
    assert!(g_is.iter().all(|g_i| *g_i == atom.g_i()));
}

#[test]
fn quadrupole_presence() {
    let atom = Rb87::atom(None, LevelFilter::All).unwrap();
    for level in atom.levels() {
        let data = atom.level_data(&level).unwrap();
        if level.j().halves() < 2 {
            assert!(data.b_hfs.is_none(), "{level}");
        }
    }
    assert!(atom.level_data(&RB87_P32).unwrap().b_hfs.is_some());
}

#[test]
fn field_setter() {
    let mut atom = Rb87::atom(None, LevelFilter::All).unwrap();
    assert!(matches!(
        atom.set_field_strength(-1.0),
        Err(ConfigurationError::NegativeField(_)),
    ));
    atom.set_field_strength(0.01).unwrap();
    assert_eq!(atom.field_strength(), 0.01);
}

#[test]
fn unknown_filter_level() {
    let unknown: Level = "6P3/2".parse().unwrap();
    assert!(matches!(
        Rb87::atom(None, LevelFilter::only([unknown])),
        Err(ConfigurationError::UnknownFilterLevel(level)) if level == unknown
    ));
}

#[test]
fn nuclear_spin_is_fixed() {
    let filters = [
        LevelFilter::All,
        LevelFilter::only([RB87_S12]),
        LevelFilter::only([RB87_P12, RB87_P32]),
    ];
    let mut rng = rand::thread_rng();
    for filter in filters {
        let field: f64 = rng.gen_range(0.0..1.0);
        let atom = Rb87::atom(Some(field), filter).unwrap();
        assert_eq!(atom.nuclear_spin(), SpinTotal::new(3));
        assert_approx_eq!(atom.nuclear_spin().f(), 1.5);
        assert_eq!(atom.field_strength(), field);
    }
}

#[test]
fn filtered_lookup() {
    let atom = Rb87::atom(None, LevelFilter::only([RB87_S12, RB87_P32])).unwrap();
    assert_eq!(atom.levels(), vec![RB87_S12, RB87_P32]);
    assert_eq!(atom.level_data(&RB87_P12), Err(LookupError::Level(RB87_P12)));
    assert_eq!(atom.transitions().len(), 2);
}
