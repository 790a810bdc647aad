use anyhow::{Context, Result};
use hivecity::config::Config;
use hivecity::sim::{run_benchmark, Simulation};
use std::env;

const CONFIG_FILE: &str = "simulation_setup.txt";

fn main() {
    if let Err(err) = run() {
        eprintln!("Error fatal: {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cfg = Config::load_from_file(CONFIG_FILE)
        .with_context(|| format!("no se pudo cargar {CONFIG_FILE}"))?
        .install();

    if env::args().any(|arg| arg == "--benchmark") {
        run_benchmark(cfg);
    } else {
        run_normal(cfg)?;
    }
    Ok(())
}

fn run_normal(cfg: &Config) -> Result<()> {
    let mut sim = Simulation::new(cfg, true).context("no se pudo inicializar la simulacion")?;
    sim.run();
    sim.save_report("simulation_report.txt")
        .context("no se pudo escribir simulation_report.txt")?;

    println!("╔════════════════════════════════════════════════════════════╗");
    println!("║              Simulacion Finalizada                         ║");
    println!("╠════════════════════════════════════════════════════════════╣");
    println!("║ Ticks ejecutados: {:>40} ║", sim.current_tick);
    println!("║ Paquetes entregados: {:>37} ║", sim.packages_delivered);
    println!("║ Agentes supervivientes: {:>34} ║", sim.vehicles_alive);
    println!("║ Ganancia neta: {:>34} creditos ║", sim.total_profit());
    println!("╚════════════════════════════════════════════════════════════╝");
    println!("Reporte completo en simulation_report.txt");
    Ok(())
}
