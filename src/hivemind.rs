// despachador central: una pasada por tick en tres fases
//   1. evacuacion por bateria critica
//   2. puntaje de cada par (agente libre, paquete libre) y commit greedy
//   3. recarga oportunista de agentes ociosos

use crate::agents::{Vehicle, VehicleKind, VehicleState};
use crate::model::{Coord, GridMap, Package, PackageId};
use std::cmp::Ordering;

/// pesos y umbrales del despachador
#[derive(Clone, Copy, Debug)]
pub struct OptimizationParams {
    pub profit_weight: f64,
    pub safety_weight: f64,
    pub urgency_weight: f64,
    pub distance_weight: f64,
    /// % de bateria bajo el cual el agente se evacua a cargar
    pub critical_battery_threshold: f32,
    /// margen % sobre la bateria requerida para aceptar una mision
    pub safe_battery_margin: f32,
}

impl Default for OptimizationParams {
    fn default() -> Self {
        Self {
            profit_weight: 0.50,
            safety_weight: 0.30,
            urgency_weight: 0.20,
            distance_weight: 0.10,
            critical_battery_threshold: 20.0,
            safe_battery_margin: 30.0,
        }
    }
}

struct AssignmentScore {
    vehicle: usize,
    package: PackageId,
    score: f64,
}

/// el despachador no guarda estado entre ticks fuera de sus parametros
#[derive(Debug, Default)]
pub struct HiveMind {
    params: OptimizationParams,
}

impl HiveMind {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(params: OptimizationParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &OptimizationParams {
        &self.params
    }

    /// decision completa de un tick
    pub fn update(
        &self,
        vehicles: &mut [Vehicle],
        packages: &mut [Package],
        map: &GridMap,
        tick: i32,
    ) {
        self.handle_low_battery(vehicles, packages, map);
        self.assign_packages(vehicles, packages, map, tick);
        self.optimize_idle(vehicles, map);
    }

    /// punto de carga (base o estacion) mas cercano en manhattan
    pub fn nearest_charging_point(position: Coord, map: &GridMap) -> Coord {
        let mut nearest = map.base;
        let mut min_dist = Coord::manhattan(position, nearest);
        for &station in &map.stations {
            let dist = Coord::manhattan(position, station);
            if dist < min_dist {
                min_dist = dist;
                nearest = station;
            }
        }
        nearest
    }

    fn kind_distance(kind: VehicleKind, a: Coord, b: Coord) -> f64 {
        if kind.is_airborne() {
            Coord::euclid(a, b)
        } else {
            Coord::manhattan(a, b) as f64
        }
    }

    /// factor sobre la distancia estimada: el BFS rodea los muros que la
    /// heuristica manhattan no ve
    fn safety_factor(kind: VehicleKind) -> f64 {
        if kind.is_airborne() { 1.1 } else { 2.0 }
    }

    /// presupuesto de distancia del viaje completo, ya con factor de
    /// seguridad: agente -> base -> destino -> cargador cercano al destino
    fn reach_budget(vehicle: &Vehicle, dest: Coord, map: &GridMap) -> f64 {
        let charger = Self::nearest_charging_point(dest, map);
        let d = Self::kind_distance(vehicle.kind, vehicle.position, map.base)
            + Self::kind_distance(vehicle.kind, map.base, dest)
            + Self::kind_distance(vehicle.kind, dest, charger);
        d * Self::safety_factor(vehicle.kind)
    }

    /// true si el agente no completaria el viaje redondo con margen
    pub fn needs_charging(&self, vehicle: &Vehicle, dest: Coord, map: &GridMap) -> bool {
        let budget = Self::reach_budget(vehicle, dest, map);
        let required = budget * vehicle.kind.consumption() as f64 / vehicle.kind.speed() as f64;
        (vehicle.battery as f64) < required * (1.0 + self.params.safe_battery_margin as f64 / 100.0)
    }

    /// ticks estimados hasta el destino; heuristica, no re-llama al BFS
    pub fn estimate_delivery_time(vehicle: &Vehicle, dest: Coord) -> i32 {
        let distance = Self::kind_distance(vehicle.kind, vehicle.position, dest);
        let path_factor = if vehicle.kind.is_airborne() { 1.0 } else { 1.3 };
        (distance * path_factor / vehicle.kind.speed() as f64).ceil() as i32
    }

    fn estimate_delivery_cost(vehicle: &Vehicle, delivery_time: i32) -> f64 {
        vehicle.kind.cost_per_tick() as f64 * delivery_time as f64
    }

    /// puntaje de asignar `package` a `vehicle`; los pares imposibles
    /// reciben -1000 y quedan fuera
    pub fn assignment_score(
        &self,
        vehicle: &Vehicle,
        package: &Package,
        map: &GridMap,
        tick: i32,
    ) -> f64 {
        if vehicle.battery_percentage() < self.params.critical_battery_threshold {
            return -1000.0;
        }
        let range = vehicle.battery as f64 / vehicle.kind.consumption() as f64
            * vehicle.kind.speed() as f64;
        if Self::reach_budget(vehicle, package.dest, map) > range {
            return -1000.0;
        }

        let delivery_time = Self::estimate_delivery_time(vehicle, package.dest);
        let delivery_cost = Self::estimate_delivery_cost(vehicle, delivery_time);

        let time_until_deadline = package.deadline - tick;
        let delay_penalty = if delivery_time > time_until_deadline { 50.0 } else { 0.0 };
        let net_profit = package.reward as f64 - delivery_cost - delay_penalty;

        // riesgo escalonado segun que % de la carga actual pide el viaje
        let battery_needed = delivery_time as f32 * vehicle.kind.consumption();
        let pct_needed = battery_needed / vehicle.battery * 100.0;
        let battery_risk = if pct_needed > 80.0 {
            1.0
        } else if pct_needed > 60.0 {
            0.7
        } else if pct_needed > 40.0 {
            0.4
        } else if pct_needed > 20.0 {
            0.2
        } else {
            0.0
        };

        let slack = time_until_deadline - delivery_time;
        let urgency_factor = if slack < 3 {
            2.0
        } else if slack < 8 {
            1.5
        } else {
            1.0
        };

        let dist_to_base = Coord::manhattan(vehicle.position, map.base);
        let distance_factor = if dist_to_base > 10 { 0.8 } else { 1.0 };

        let mut score = 0.0;
        score += self.params.profit_weight * (net_profit / 800.0);
        score += self.params.safety_weight * (1.0 - battery_risk);
        score += self.params.urgency_weight * (urgency_factor / (delivery_time + 1) as f64);
        score += self.params.distance_weight * distance_factor;

        // afinidad por tipo
        match vehicle.kind {
            VehicleKind::Robot if package.reward < 400 => score += 0.2,
            VehicleKind::Drone if package.reward > 600 && time_until_deadline < 15 => score += 0.3,
            VehicleKind::Scooter if (5..=15).contains(&delivery_time) => score += 0.1,
            _ => {}
        }

        score
    }

    // fase 1
    fn handle_low_battery(
        &self,
        vehicles: &mut [Vehicle],
        packages: &mut [Package],
        map: &GridMap,
    ) {
        for vehicle in vehicles.iter_mut() {
            if !vehicle.is_alive() || vehicle.state == VehicleState::Charging {
                continue;
            }
            if vehicle.battery_percentage() < self.params.critical_battery_threshold {
                let charger = Self::nearest_charging_point(vehicle.position, map);
                if let Some(pkg) = vehicle.send_to_charge(charger) {
                    packages[pkg].assigned = false;
                }
            }
        }
    }

    // fase 2
    fn assign_packages(
        &self,
        vehicles: &mut [Vehicle],
        packages: &mut [Package],
        map: &GridMap,
        tick: i32,
    ) {
        let mut scores = Vec::new();
        for (vi, vehicle) in vehicles.iter().enumerate() {
            if !vehicle.is_alive() || vehicle.is_busy() {
                continue;
            }
            for package in packages.iter() {
                if package.assigned || package.delivered {
                    continue;
                }
                let score = self.assignment_score(vehicle, package, map, tick);
                if score > 0.0 {
                    scores.push(AssignmentScore { vehicle: vi, package: package.id, score });
                }
            }
        }

        // orden estable: los empates conservan el orden de iteracion
        scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let mut vehicle_taken = vec![false; vehicles.len()];
        let mut package_taken = vec![false; packages.len()];

        for entry in &scores {
            if vehicle_taken[entry.vehicle] || package_taken[entry.package] {
                continue;
            }
            let vehicle = &mut vehicles[entry.vehicle];
            let package = &mut packages[entry.package];

            if self.needs_charging(vehicle, package.dest, map) {
                // no le alcanza con margen: primero a cargar y el paquete
                // queda libre para el proximo tick
                let charger = Self::nearest_charging_point(vehicle.position, map);
                vehicle.send_to_charge(charger);
            } else {
                vehicle.assign_task(entry.package, map.base);
                package.assigned = true;
            }
            vehicle_taken[entry.vehicle] = true;
            package_taken[entry.package] = true;
        }
    }

    // fase 3
    fn optimize_idle(&self, vehicles: &mut [Vehicle], map: &GridMap) {
        for vehicle in vehicles.iter_mut() {
            if !vehicle.is_alive() || vehicle.is_busy() {
                continue;
            }
            if vehicle.state == VehicleState::Idle && vehicle.battery_percentage() < 90.0 {
                let charger = Self::nearest_charging_point(vehicle.position, map);
                if vehicle.position != charger {
                    vehicle.send_to_charge(charger);
                }
            }
        }
    }
}
