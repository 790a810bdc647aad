// sistema de simulacion

mod benchmark;
mod simulation;
mod spawner;

pub use benchmark::{run_benchmark, TOTAL_ITERATIONS};
pub use simulation::{Simulation, DEATH_PENALTY};
pub use spawner::PackageSpawner;
