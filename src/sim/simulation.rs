// driver de la simulacion: loop de ticks, contabilidad y reporte final

use crate::agents::{Vehicle, VehicleKind, VehicleState};
use crate::config::Config;
use crate::error::SimError;
use crate::hivemind::HiveMind;
use crate::log::SimLogger;
use crate::model::{GridMap, Package, PackageId, ProceduralMapGenerator};
use crate::sim_log;

use super::PackageSpawner;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io;

/// penalizacion por agente muerto en ruta
pub const DEATH_PENALTY: i64 = 500;

pub struct Simulation {
    pub map: GridMap,
    pub vehicles: Vec<Vehicle>,
    pub packages: Vec<Package>,
    pub hive_mind: HiveMind,
    pub spawner: PackageSpawner,
    rng: StdRng,
    pub current_tick: i32,
    pub total_ticks: i32,
    pub spawn_frequency: i32,
    pub total_packages: usize,
    pub total_revenue: i64,
    pub total_costs: i64,
    pub total_penalties: i64,
    pub packages_delivered: u32,
    pub packages_failed: u32,
    pub late_deliveries: u32,
    pub vehicles_lost: u32,
    pub vehicles_alive: u32,
    logger: SimLogger,
}

impl Simulation {
    /// crea la simulacion con un rng derivado del stream del hilo
    pub fn new(cfg: &Config, logging: bool) -> Result<Self, SimError> {
        Self::with_rng(cfg, StdRng::from_rng(&mut rand::rng()), logging)
    }

    /// punto de inyeccion para tests: un rng sembrado reproduce la
    /// corrida bit a bit
    pub fn with_rng(cfg: &Config, mut rng: StdRng, logging: bool) -> Result<Self, SimError> {
        let map = ProceduralMapGenerator::generate(cfg, &mut rng)?;
        Ok(Self::from_parts(cfg, map, rng, logging))
    }

    /// armado directo con un mapa ya construido (escenarios fijos)
    pub fn from_parts(cfg: &Config, map: GridMap, rng: StdRng, logging: bool) -> Self {
        let logger = if logging {
            SimLogger::to_file("simulation_log.txt").unwrap_or_else(|_| SimLogger::disabled())
        } else {
            SimLogger::disabled()
        };

        let mut sim = Self {
            map,
            vehicles: Vec::new(),
            packages: Vec::new(),
            hive_mind: HiveMind::new(),
            spawner: PackageSpawner::new(),
            rng,
            current_tick: 0,
            total_ticks: cfg.max_ticks,
            spawn_frequency: cfg.spawn_frequency,
            total_packages: cfg.total_packages,
            total_revenue: 0,
            total_costs: 0,
            total_penalties: 0,
            packages_delivered: 0,
            packages_failed: 0,
            late_deliveries: 0,
            vehicles_lost: 0,
            vehicles_alive: 0,
            logger,
        };
        sim.generate_initial_vehicles(cfg);
        sim_log!(sim.logger, 0, "=== INICIO DE SIMULACION ===");
        sim_log!(
            sim.logger,
            0,
            "Mapa {}x{} listo, {} agentes creados",
            sim.map.width,
            sim.map.height,
            sim.vehicles.len()
        );
        sim
    }

    fn generate_initial_vehicles(&mut self, cfg: &Config) {
        let base = self.map.base;
        let mut id = 0u32;
        for _ in 0..cfg.drones {
            self.vehicles.push(Vehicle::new(id, VehicleKind::Drone, base));
            id += 1;
        }
        for _ in 0..cfg.robots {
            self.vehicles.push(Vehicle::new(id, VehicleKind::Robot, base));
            id += 1;
        }
        for _ in 0..cfg.scooters {
            self.vehicles.push(Vehicle::new(id, VehicleKind::Scooter, base));
            id += 1;
        }
        self.vehicles_alive = self.vehicles.len() as u32;
    }

    /// paso 2 del tick: genera a lo sumo un paquete
    pub fn spawn_packages(&mut self) {
        let spawned = self.packages.len();
        if let Some(pkg) = self.spawner.maybe_spawn(
            self.current_tick,
            self.spawn_frequency,
            self.total_packages,
            &self.map,
            spawned,
            &mut self.rng,
        ) {
            sim_log!(
                self.logger,
                self.current_tick,
                "Generado paquete {} con recompensa {} y deadline en tick {}",
                pkg.id,
                pkg.reward,
                pkg.deadline
            );
            self.packages.push(pkg);
        }
    }

    /// paso 3: decision del hivemind; deja registrada cada asignacion nueva
    pub fn dispatch(&mut self) {
        let before: Vec<Option<PackageId>> =
            self.vehicles.iter().map(|v| v.package()).collect();

        self.hive_mind
            .update(&mut self.vehicles, &mut self.packages, &self.map, self.current_tick);

        if self.logger.enabled() {
            for (vehicle, prev) in self.vehicles.iter().zip(before) {
                if vehicle.package() != prev {
                    if let Some(pkg) = vehicle.package() {
                        sim_log!(
                            self.logger,
                            self.current_tick,
                            "Paquete {} asignado al agente {} [{}]",
                            pkg,
                            vehicle.id,
                            vehicle.kind.name()
                        );
                    }
                }
            }
        }
    }

    /// paso 4: cobro de costos, carga o movimiento de cada agente vivo
    pub fn update_vehicles(&mut self) {
        let tick = self.current_tick;
        for vehicle in self.vehicles.iter_mut() {
            if !vehicle.is_alive() {
                continue;
            }

            let on_charger = self.map.is_charging_cell(vehicle.position);

            // el costo operativo corre salvo que descanse sobre un cargador
            if !on_charger || vehicle.state == VehicleState::Moving {
                self.total_costs += vehicle.kind.cost_per_tick();
            }

            if on_charger && vehicle.state != VehicleState::Moving {
                if vehicle.battery_percentage() < 100.0 {
                    vehicle.state = VehicleState::Charging;
                    vehicle.charge();
                } else {
                    vehicle.state = VehicleState::Idle;
                }
            } else {
                let battery_before = vehicle.battery;
                vehicle.update(&self.map, &self.packages);

                if !vehicle.is_alive() && battery_before > 0.0 {
                    sim_log!(
                        self.logger,
                        tick,
                        "!!! AGENTE MUERTO !!! id {} [{}] en ({}, {}), bateria agotada",
                        vehicle.id,
                        vehicle.kind.name(),
                        vehicle.position.x,
                        vehicle.position.y
                    );
                    self.vehicles_lost += 1;
                    self.total_penalties += DEATH_PENALTY;
                    if let Some(pkg) = vehicle.release_package() {
                        self.packages[pkg].assigned = false;
                    }
                }
            }
        }
    }

    /// paso 5: entregas; solo cuenta si el agente paso por la base a
    /// recoger el paquete fisico
    pub fn process_deliveries(&mut self) {
        let tick = self.current_tick;
        for vehicle in self.vehicles.iter_mut() {
            if !vehicle.is_alive() || !vehicle.is_busy() {
                continue;
            }
            let Some(pkg_id) = vehicle.package() else { continue };
            if vehicle.position != self.packages[pkg_id].dest || !vehicle.has_physical_package() {
                continue;
            }

            let package = &mut self.packages[pkg_id];
            package.delivered = true;
            self.packages_delivered += 1;
            self.total_revenue += package.reward as i64;

            if package.is_late(tick) {
                self.late_deliveries += 1;
                self.total_penalties += package.delay_penalty(tick);
                sim_log!(
                    self.logger,
                    tick,
                    "Paquete {} entregado por agente {} [{}] con retraso de {} ticks, penalizacion 50",
                    package.id,
                    vehicle.id,
                    vehicle.kind.name(),
                    package.delay(tick)
                );
            } else {
                sim_log!(
                    self.logger,
                    tick,
                    "Paquete {} entregado por agente {} [{}] a tiempo",
                    package.id,
                    vehicle.id,
                    vehicle.kind.name()
                );
            }
            vehicle.drop_package();
        }
    }

    /// paso 6: recuento de vivos
    pub fn check_vehicle_status(&mut self) {
        self.vehicles_alive = self.vehicles.iter().filter(|v| v.is_alive()).count() as u32;
    }

    /// loop principal; al salir aplica las penalizaciones por paquetes
    /// nunca entregados
    pub fn run(&mut self) {
        sim_log!(
            self.logger,
            self.current_tick,
            "Simulacion iniciada, max {} ticks",
            self.total_ticks
        );

        while self.current_tick < self.total_ticks {
            self.current_tick += 1;

            if self.current_tick % 100 == 0 {
                sim_log!(self.logger, self.current_tick, "--- HEARTBEAT: tick {} ---", self.current_tick);
            }

            self.spawn_packages();
            self.dispatch();
            self.update_vehicles();
            self.process_deliveries();
            self.check_vehicle_status();

            if self.vehicles_alive == 0 {
                sim_log!(
                    self.logger,
                    self.current_tick,
                    "Toda la flota murio, la simulacion termina antes de tiempo"
                );
                break;
            }
        }

        for package in &self.packages {
            if !package.delivered {
                self.total_penalties += package.failure_penalty();
                self.packages_failed += 1;
            }
        }

        sim_log!(self.logger, self.current_tick, "=== FIN DE SIMULACION ===");
    }

    pub fn total_profit(&self) -> i64 {
        self.total_revenue - self.total_costs - self.total_penalties
    }

    pub fn success_rate(&self) -> f64 {
        if self.packages.is_empty() {
            0.0
        } else {
            self.packages_delivered as f64 * 100.0 / self.packages.len() as f64
        }
    }

    /// reporte en texto plano; funcion pura del estado final
    pub fn render_report(&self) -> String {
        let mut out = String::new();
        out.push_str("=== REPORTE FINAL SIMULACION HIVEMIND ===\n\n");

        out.push_str("CONFIGURACION:\n");
        out.push_str(&format!("Ticks maximos: {}\n", self.total_ticks));
        out.push_str(&format!("Ticks ejecutados: {}\n", self.current_tick));
        out.push_str(&format!("Dimension del mapa: {}x{}\n", self.map.width, self.map.height));
        out.push_str(&format!("Agentes iniciales: {}\n", self.vehicles.len()));
        out.push_str(&format!("Paquetes generados: {}\n\n", self.packages.len()));

        out.push_str("ESTADISTICAS OPERACIONALES:\n");
        out.push_str(&format!("Agentes supervivientes: {}\n", self.vehicles_alive));
        out.push_str(&format!("Agentes perdidos: {}\n", self.vehicles_lost));
        out.push_str(&format!("Paquetes entregados: {}\n", self.packages_delivered));
        out.push_str(&format!("Paquetes no entregados: {}\n", self.packages_failed));
        out.push_str(&format!("Tasa de exito: {:.2}%\n\n", self.success_rate()));

        out.push_str("ESTADISTICAS FINANCIERAS:\n");
        out.push_str(&format!(
            "Margen bruto: {} creditos\n",
            self.total_revenue - self.total_costs
        ));
        out.push_str(&format!("Ingresos totales: {} creditos\n", self.total_revenue));
        out.push_str(&format!("Costos totales: {} creditos\n", self.total_costs));
        out.push_str(&format!("Penalizaciones totales: {} creditos\n", self.total_penalties));
        out.push_str(&format!(
            "  - Agentes muertos: {} creditos (500 c/u)\n",
            self.vehicles_lost as i64 * DEATH_PENALTY
        ));
        out.push_str(&format!(
            "  - Entregas tardias: {} creditos (50 c/u)\n",
            self.late_deliveries as i64 * 50
        ));
        out.push_str(&format!(
            "  - Paquetes no entregados: {} creditos (200 c/u)\n",
            self.packages_failed as i64 * 200
        ));
        out.push_str(&format!("GANANCIA NETA: {} creditos\n\n", self.total_profit()));

        out.push_str("DETALLE POR TIPO:\n");
        for kind in [VehicleKind::Drone, VehicleKind::Robot, VehicleKind::Scooter] {
            let total = self.vehicles.iter().filter(|v| v.kind == kind).count();
            let alive = self
                .vehicles
                .iter()
                .filter(|v| v.kind == kind && v.is_alive())
                .count();
            out.push_str(&format!("{}: {}/{} supervivientes\n", kind.name(), alive, total));
        }

        out
    }

    pub fn save_report(&self, path: &str) -> io::Result<()> {
        std::fs::write(path, self.render_report())
    }
}
