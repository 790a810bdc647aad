// generacion procedural por rechazo: colocar al azar y validar
// conectividad desde la base

use crate::config::Config;
use crate::error::SimError;
use rand::Rng;
use std::collections::VecDeque;

use super::{Cell, Coord, GridMap};

pub const MAX_GENERATION_ATTEMPTS: u32 = 2000;

/// fraccion del area sembrada con muros
const WALL_FRACTION: f64 = 0.2;

const DX: [i32; 4] = [0, 0, -1, 1];
const DY: [i32; 4] = [-1, 1, 0, 0];

pub struct ProceduralMapGenerator;

impl ProceduralMapGenerator {
    /// intenta hasta MAX_GENERATION_ATTEMPTS mapas; cada candidato debe
    /// tener todos los clientes y estaciones alcanzables desde la base
    pub fn generate(cfg: &Config, rng: &mut impl Rng) -> Result<GridMap, SimError> {
        let area = (cfg.map_height * cfg.map_width) as u32;
        let needed = 1 + cfg.clients_count + cfg.max_stations;
        if needed > area {
            // el muestreo de celdas vacias no terminaria nunca
            return Err(SimError::MapGeneration { attempts: 0 });
        }

        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let map = Self::try_generate(cfg, rng);
            if Self::validate(&map) {
                return Ok(map);
            }
        }
        Err(SimError::MapGeneration { attempts: MAX_GENERATION_ATTEMPTS })
    }

    fn try_generate(cfg: &Config, rng: &mut impl Rng) -> GridMap {
        let mut map = GridMap::new(cfg.map_height, cfg.map_width);

        let (x, y) = Self::random_cell(cfg, rng);
        map.set_cell(x, y, Cell::Base);

        for _ in 0..cfg.clients_count {
            let (x, y) = Self::random_empty_cell(&map, cfg, rng);
            map.set_cell(x, y, Cell::Client);
        }
        for _ in 0..cfg.max_stations {
            let (x, y) = Self::random_empty_cell(&map, cfg, rng);
            map.set_cell(x, y, Cell::Station);
        }

        let walls = (map.area() as f64 * WALL_FRACTION) as i32;
        for _ in 0..walls {
            let (x, y) = Self::random_cell(cfg, rng);
            if map.cell(x, y) == Cell::Empty {
                map.set_cell(x, y, Cell::Wall);
            }
        }
        map
    }

    fn random_cell(cfg: &Config, rng: &mut impl Rng) -> (i32, i32) {
        (
            rng.random_range(0..cfg.map_width),
            rng.random_range(0..cfg.map_height),
        )
    }

    fn random_empty_cell(map: &GridMap, cfg: &Config, rng: &mut impl Rng) -> (i32, i32) {
        loop {
            let (x, y) = Self::random_cell(cfg, rng);
            if map.cell(x, y) == Cell::Empty {
                return (x, y);
            }
        }
    }

    /// BFS desde la base: cuenta clientes y estaciones alcanzados
    fn validate(map: &GridMap) -> bool {
        let mut visited = vec![false; map.area() as usize];
        let mut queue = VecDeque::new();

        let idx = |c: Coord| (c.y * map.width + c.x) as usize;
        visited[idx(map.base)] = true;
        queue.push_back(map.base);

        let total_targets = map.clients.len() + map.stations.len();
        let mut targets_found = 0usize;

        while let Some(curr) = queue.pop_front() {
            match map.cell(curr.x, curr.y) {
                Cell::Client | Cell::Station => targets_found += 1,
                _ => {}
            }
            for i in 0..4 {
                let nx = curr.x + DX[i];
                let ny = curr.y + DY[i];
                if !map.in_bounds(nx, ny) || map.cell(nx, ny) == Cell::Wall {
                    continue;
                }
                let next = Coord::new(nx, ny);
                if !visited[idx(next)] {
                    visited[idx(next)] = true;
                    queue.push_back(next);
                }
            }
        }
        targets_found == total_targets
    }
}
