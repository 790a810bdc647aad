// generador de paquetes: cliente uniforme, recompensa 200..=800,
// deadline a tick + 10..=20

use crate::model::{GridMap, Package};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

pub struct PackageSpawner {
    reward_dist: Uniform<i32>,
    deadline_dist: Uniform<i32>,
}

impl PackageSpawner {
    pub fn new() -> Self {
        Self {
            reward_dist: Uniform::new_inclusive(200, 800).unwrap(),
            deadline_dist: Uniform::new_inclusive(10, 20).unwrap(),
        }
    }

    /// a lo sumo un paquete por tick de spawn, hasta el tope configurado;
    /// `spawned` es la cantidad ya generada y se usa como id
    pub fn maybe_spawn(
        &self,
        tick: i32,
        frequency: i32,
        cap: usize,
        map: &GridMap,
        spawned: usize,
        rng: &mut impl Rng,
    ) -> Option<Package> {
        if tick % frequency != 0 {
            return None;
        }
        if spawned >= cap {
            return None;
        }
        if map.clients.is_empty() {
            return None;
        }

        let client_id = rng.random_range(0..map.clients.len());
        Some(Package::new(
            spawned,
            map.clients[client_id],
            self.reward_dist.sample(rng),
            tick + self.deadline_dist.sample(rng),
            tick,
            client_id,
        ))
    }
}

impl Default for PackageSpawner {
    fn default() -> Self {
        Self::new()
    }
}
