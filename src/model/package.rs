use super::Coord;

/// indice estable dentro del vector de paquetes de la simulacion;
/// los paquetes nunca se quitan del vector, asi que el id coincide
/// siempre con su posicion
pub type PackageId = usize;

/// paquete pendiente de reparto
#[derive(Clone, Debug)]
pub struct Package {
    pub id: PackageId,
    pub dest: Coord,
    pub reward: i32,
    pub deadline: i32,
    pub spawn_tick: i32,
    pub client_id: usize,
    pub assigned: bool,
    pub delivered: bool,
}

impl Package {
    pub fn new(
        id: PackageId,
        dest: Coord,
        reward: i32,
        deadline: i32,
        spawn_tick: i32,
        client_id: usize,
    ) -> Self {
        Self {
            id,
            dest,
            reward,
            deadline,
            spawn_tick,
            client_id,
            assigned: false,
            delivered: false,
        }
    }

    #[inline]
    pub fn is_late(&self, tick: i32) -> bool {
        tick > self.deadline
    }

    /// retraso en ticks respecto al deadline
    pub fn delay(&self, tick: i32) -> i32 {
        if self.is_late(tick) { tick - self.deadline } else { 0 }
    }

    pub fn delay_penalty(&self, tick: i32) -> i64 {
        if self.is_late(tick) { 50 } else { 0 }
    }

    pub fn failure_penalty(&self) -> i64 {
        if self.delivered { 0 } else { 200 }
    }
}
