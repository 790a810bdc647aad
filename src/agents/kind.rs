// tipos de vehiculo de la flota; difieren solo en constantes y en
// la forma de moverse

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VehicleKind {
    Drone,
    Robot,
    Scooter,
}

impl VehicleKind {
    /// celdas por tick en movimiento
    pub fn speed(self) -> f32 {
        match self {
            VehicleKind::Drone => 3.0,
            VehicleKind::Robot => 1.0,
            VehicleKind::Scooter => 2.0,
        }
    }

    pub fn max_battery(self) -> f32 {
        match self {
            VehicleKind::Drone => 100.0,
            VehicleKind::Robot => 300.0,
            VehicleKind::Scooter => 200.0,
        }
    }

    /// bateria consumida por tick de movimiento
    pub fn consumption(self) -> f32 {
        match self {
            VehicleKind::Drone => 10.0,
            VehicleKind::Robot => 2.0,
            VehicleKind::Scooter => 5.0,
        }
    }

    /// costo operativo por tick
    pub fn cost_per_tick(self) -> i64 {
        match self {
            VehicleKind::Drone => 15,
            VehicleKind::Robot => 1,
            VehicleKind::Scooter => 4,
        }
    }

    /// los drones vuelan en linea recta e ignoran muros
    #[inline]
    pub fn is_airborne(self) -> bool {
        matches!(self, VehicleKind::Drone)
    }

    pub fn name(self) -> &'static str {
        match self {
            VehicleKind::Drone => "DRON",
            VehicleKind::Robot => "ROBOT",
            VehicleKind::Scooter => "SCOOTER",
        }
    }
}
