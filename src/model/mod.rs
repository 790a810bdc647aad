// reune las piezas del modelo

mod cell;
mod coord;
mod map;
mod mapgen;
mod package;

pub use cell::Cell;
pub use coord::Coord;
pub use map::GridMap;
pub use mapgen::{ProceduralMapGenerator, MAX_GENERATION_ATTEMPTS};
pub use package::{Package, PackageId};
