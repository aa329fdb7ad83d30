use std::f64::consts::TAU;
use anyhow::Context;
use itertools::Itertools;
use tracing::info;
use tracing_subscriber::EnvFilter;
use atomic_species::{
    config::AtomConfig,
    consts::joules_to_hz,
    hilbert::HyperfineState,
    Atom,
    Rb87,
    Species,
};

fn print_atom(atom: &Atom) -> anyhow::Result<()> {
    println!(
        "{}: I = {}, g_I = {:+.9}, B = {:.3e} T",
        atom.name(),
        atom.nuclear_spin(),
        atom.g_i(),
        atom.field_strength(),
    );
    for level in atom.levels() {
        let data = atom.level_data(&level)?;
        println!(
            "  {:<6} A = {:>14.6} MHz  B = {:>10} MHz  g_J = {:.7}",
            level,
            joules_to_hz(data.a_hfs) * 1e-6,
            data.b_hfs
                .map(|b| format!("{:.6}", joules_to_hz(b) * 1e-6))
                .unwrap_or_else(|| "-".to_string()),
            data.g_j,
        );
        for f in atom.hyperfine_levels(&level)? {
            println!(
                "    F = {:<3} shift = {:>+12.4} MHz  g_F = {:+.5}",
                f,
                joules_to_hz(atom.hyperfine_shift(&level, f)?) * 1e-6,
                atom.g_f(&level, f)?,
            );
        }
    }
    for (label, tr) in atom.active_transitions() {
        println!(
            "  {:<4} {} -> {}  f = {:.6e} Hz  A = {:.4e} 1/s  tau = {:.3} ns",
            label,
            tr.lower,
            tr.upper,
            tr.frequency_hz(),
            tr.a,
            tr.lifetime() * 1e9,
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config
        = match std::env::args().nth(1) {
            Some(path) => {
                AtomConfig::load(&path)
                    .with_context(|| format!("reading config {path}"))?
            },
            None => AtomConfig::default(),
        };
    let atom = Rb87::from_config(&config)?;
    print_atom(&atom)?;

    let basis = atom.hyperfine_basis();
    info!(states = basis.num_states(), "built hyperfine basis");
    let e0 = basis.get_energy_index(0).unwrap_or(0.0);
    for (state, e) in basis.iter() {
        let HyperfineState { level, spin } = state;
        println!(
            "  |{}, F={}, mF={}>  {:+.6} MHz",
            level,
            spin.total(),
            spin.proj(),
            (e - e0) / TAU * 1e-6,
        );
    }
    println!(
        "{} dipole couplings",
        basis.couplings().len(),
    );
    println!(
        "levels: {}",
        atom.levels().iter().join(", "),
    );
    Ok(())
}
