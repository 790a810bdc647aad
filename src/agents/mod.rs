mod kind;
mod vehicle;

pub use kind::VehicleKind;
pub use vehicle::{Vehicle, VehicleState};
