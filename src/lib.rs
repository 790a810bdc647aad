// modulo raiz de hivecity
// organiza el modelo del mapa, la flota y el despachador de la simulacion

pub mod agents;
pub mod config;
pub mod error;
pub mod hivemind;
pub mod log;
pub mod model;
pub mod pathfind;
pub mod sim;

// reexports comodos
pub use agents::*;
pub use config::Config;
pub use error::{ConfigError, SimError};
pub use hivemind::{HiveMind, OptimizationParams};
pub use model::*;
pub use sim::*;
