// vehiculo de reparto: maquina de estados, energia y movimiento

use crate::model::{Coord, GridMap, Package, PackageId};
use crate::pathfind;

use super::VehicleKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VehicleState {
    Idle,
    Moving,
    Charging,
    Dead,
}

/// agente movil controlado por el hivemind; la referencia al paquete es
/// un indice estable, nunca un puntero
#[derive(Clone, Debug)]
pub struct Vehicle {
    pub id: u32,
    pub kind: VehicleKind,
    pub position: Coord,
    pub target: Coord,
    pub battery: f32,
    pub state: VehicleState,
    package: Option<PackageId>,
    has_physical_package: bool,
}

impl Vehicle {
    pub fn new(id: u32, kind: VehicleKind, position: Coord) -> Self {
        Self {
            id,
            kind,
            position,
            target: position,
            battery: kind.max_battery(),
            state: VehicleState::Idle,
            package: None,
            has_physical_package: false,
        }
    }

    #[inline]
    pub fn battery_percentage(&self) -> f32 {
        self.battery / self.kind.max_battery() * 100.0
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.state != VehicleState::Dead
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.package.is_some()
    }

    #[inline]
    pub fn package(&self) -> Option<PackageId> {
        self.package
    }

    #[inline]
    pub fn has_physical_package(&self) -> bool {
        self.has_physical_package
    }

    /// acepta una mision; `dest` es la base, donde primero se recoge
    pub fn assign_task(&mut self, pkg: PackageId, dest: Coord) {
        self.package = Some(pkg);
        self.has_physical_package = false;
        self.target = dest;
        self.state = VehicleState::Moving;
    }

    /// redirige a un punto de carga; si llevaba una mision la devuelve
    /// para que el llamador la marque sin asignar
    pub fn send_to_charge(&mut self, station: Coord) -> Option<PackageId> {
        self.target = station;
        self.state = VehicleState::Moving;
        self.has_physical_package = false;
        self.package.take()
    }

    /// entrega completada: suelta el paquete y queda libre
    pub fn drop_package(&mut self) {
        self.package = None;
        self.has_physical_package = false;
        self.state = VehicleState::Idle;
    }

    /// libera el paquete sin tocar el estado (muerte en ruta)
    pub fn release_package(&mut self) -> Option<PackageId> {
        self.has_physical_package = false;
        self.package.take()
    }

    /// +25% de la bateria maxima; solo surte efecto en reposo
    pub fn charge(&mut self) {
        if matches!(self.state, VehicleState::Idle | VehicleState::Charging) {
            self.battery = (self.battery + self.kind.max_battery() * 0.25).min(self.kind.max_battery());
        }
    }

    /// un tick de movimiento: consume bateria una sola vez, avanza hasta
    /// `speed` celdas y resuelve la transicion de llegada
    pub fn update(&mut self, map: &GridMap, packages: &[Package]) {
        if self.state != VehicleState::Moving {
            return;
        }

        self.battery -= self.kind.consumption();
        if self.battery <= 0.0 {
            self.battery = 0.0;
            self.state = VehicleState::Dead;
            return;
        }

        let steps = self.kind.speed() as i32;
        if self.kind.is_airborne() {
            for _ in 0..steps {
                if self.position == self.target {
                    break;
                }
                // alinea primero x, despues y
                if self.position.x < self.target.x {
                    self.position.x += 1;
                } else if self.position.x > self.target.x {
                    self.position.x -= 1;
                } else if self.position.y < self.target.y {
                    self.position.y += 1;
                } else {
                    self.position.y -= 1;
                }
            }
        } else {
            for _ in 0..steps {
                if self.position == self.target {
                    break;
                }
                let next = pathfind::next_step(self.position, self.target, map);
                if next == self.position {
                    // sin camino, no avanza este tick
                    break;
                }
                self.position = next;
            }
        }

        if self.position == self.target {
            if let Some(pkg) = self.package {
                if !self.has_physical_package && self.position == map.base {
                    // recoge el paquete y sale hacia el cliente
                    self.has_physical_package = true;
                    self.target = packages[pkg].dest;
                    return;
                }
            }
            self.state = VehicleState::Idle;
        }
    }
}
