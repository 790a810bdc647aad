// utilidad de depuracion: genera un mapa desde la configuracion y lo imprime

use hivecity::config::Config;
use hivecity::model::ProceduralMapGenerator;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;

fn main() {
    let path = env::args().nth(1).unwrap_or_else(|| "simulation_setup.txt".to_string());

    let cfg = match Config::load_from_file(&path) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("Error fatal: {err}");
            std::process::exit(1);
        }
    };

    let mut rng = StdRng::from_rng(&mut rand::rng());
    match ProceduralMapGenerator::generate(&cfg, &mut rng) {
        Ok(map) => {
            println!(
                "Mapa {}x{} | base ({}, {}) | {} clientes | {} estaciones",
                map.width,
                map.height,
                map.base.x,
                map.base.y,
                map.clients.len(),
                map.stations.len()
            );
            print!("{}", map.render());
        }
        Err(err) => {
            eprintln!("Error fatal: {err}");
            std::process::exit(1);
        }
    }
}
