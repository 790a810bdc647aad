// Tests del despachador: puntajes, fases y asignacion greedy

use hivecity::model::{Coord, GridMap, Package};
use hivecity::{HiveMind, OptimizationParams, Vehicle, VehicleKind, VehicleState};

fn corridor_map() -> GridMap {
    // base en (0,0), cliente en (9,0)
    GridMap::from_ascii("B........D").expect("mapa de prueba valido")
}

#[test]
fn test_critical_battery_rejects_and_evicts() {
    let map = GridMap::from_ascii("B....D....").expect("mapa de prueba valido");
    let hive = HiveMind::new();

    let mut vehicles = vec![Vehicle::new(0, VehicleKind::Drone, Coord::new(3, 0))];
    vehicles[0].battery = 18.0;
    let mut packages = vec![Package::new(0, Coord::new(5, 0), 500, 20, 0, 0)];

    let score = hive.assignment_score(&vehicles[0], &packages[0], &map, 1);
    assert_eq!(score, -1000.0);

    hive.update(&mut vehicles, &mut packages, &map, 1);

    // fase 1 manda a cargar y fase 2 no lo reasigna este tick
    assert_eq!(vehicles[0].target, map.base);
    assert_eq!(vehicles[0].state, VehicleState::Moving);
    assert!(!vehicles[0].is_busy());
    assert!(!packages[0].assigned);
}

#[test]
fn test_out_of_range_pair_rejected() {
    let map = GridMap::from_ascii("B........................D....").expect("mapa de prueba valido");
    let hive = HiveMind::new();

    let mut robot = Vehicle::new(0, VehicleKind::Robot, map.base);
    robot.battery = 70.0; // 23%: pasa el umbral critico pero no el presupuesto
    let package = Package::new(0, Coord::new(25, 0), 800, 60, 0, 0);

    assert_eq!(hive.assignment_score(&robot, &package, &map, 1), -1000.0);
}

#[test]
fn test_greedy_commits_distinct_pairs() {
    let map = GridMap::from_ascii("BD.D......").expect("mapa de prueba valido");
    let hive = HiveMind::new();

    let mut vehicles = vec![
        Vehicle::new(0, VehicleKind::Drone, map.base),
        Vehicle::new(1, VehicleKind::Drone, map.base),
    ];
    let mut packages = vec![
        Package::new(0, Coord::new(1, 0), 400, 25, 0, 0),
        Package::new(1, Coord::new(3, 0), 600, 25, 0, 1),
    ];

    hive.update(&mut vehicles, &mut packages, &map, 1);

    assert!(packages[0].assigned && packages[1].assigned);
    let first = vehicles[0].package().expect("agente 0 con mision");
    let second = vehicles[1].package().expect("agente 1 con mision");
    assert_ne!(first, second, "un paquete por agente");
}

#[test]
fn test_needs_charging_diverts_instead_of_assigning() {
    let map = corridor_map();
    let hive = HiveMind::new();

    let mut vehicles = vec![Vehicle::new(0, VehicleKind::Drone, map.base)];
    // 70%: alcanza para el viaje pero no con el margen del 30%
    vehicles[0].battery = 70.0;
    let mut packages = vec![Package::new(0, Coord::new(9, 0), 500, 20, 0, 0)];

    assert!(hive.needs_charging(&vehicles[0], packages[0].dest, &map));
    assert!(hive.assignment_score(&vehicles[0], &packages[0], &map, 1) > 0.0);

    hive.update(&mut vehicles, &mut packages, &map, 1);

    assert!(!vehicles[0].is_busy());
    assert_eq!(vehicles[0].target, map.base);
    assert!(!packages[0].assigned, "el paquete queda libre para otro tick");
}

#[test]
fn test_idle_topup_below_ninety_percent() {
    let map = corridor_map();
    let hive = HiveMind::new();

    let mut vehicles = vec![
        Vehicle::new(0, VehicleKind::Drone, Coord::new(3, 0)),
        Vehicle::new(1, VehicleKind::Drone, Coord::new(4, 0)),
    ];
    vehicles[0].battery = 80.0;
    vehicles[1].battery = 95.0;
    let mut packages = Vec::new();

    hive.update(&mut vehicles, &mut packages, &map, 1);

    assert_eq!(vehicles[0].state, VehicleState::Moving);
    assert_eq!(vehicles[0].target, map.base);

    // con bateria casi llena se queda donde esta
    assert_eq!(vehicles[1].state, VehicleState::Idle);
    assert_eq!(vehicles[1].target, Coord::new(4, 0));
}

#[test]
fn test_update_is_idempotent_within_a_tick() {
    let map = GridMap::from_ascii("B...S.....\n..........\n....D....D").expect("mapa de prueba valido");
    let hive = HiveMind::new();

    let mut vehicles = vec![
        Vehicle::new(0, VehicleKind::Drone, map.base),
        Vehicle::new(1, VehicleKind::Robot, Coord::new(4, 1)),
        Vehicle::new(2, VehicleKind::Scooter, Coord::new(2, 0)),
    ];
    vehicles[1].battery = 45.0; // 15%, critico
    vehicles[2].battery = 100.0; // 50%
    let mut packages = vec![
        Package::new(0, Coord::new(4, 2), 700, 20, 0, 0),
        Package::new(1, Coord::new(9, 2), 350, 25, 0, 1),
    ];

    hive.update(&mut vehicles, &mut packages, &map, 3);
    let snapshot: Vec<_> = vehicles
        .iter()
        .map(|v| (v.target, v.state, v.package()))
        .collect();

    hive.update(&mut vehicles, &mut packages, &map, 3);
    let again: Vec<_> = vehicles
        .iter()
        .map(|v| (v.target, v.state, v.package()))
        .collect();

    assert_eq!(snapshot, again);
}

#[test]
fn test_affinity_prefers_drone_for_urgent_expensive() {
    let map = GridMap::from_ascii("B......D").expect("mapa de prueba valido");
    let hive = HiveMind::new();

    let mut vehicles = vec![
        Vehicle::new(0, VehicleKind::Robot, map.base),
        Vehicle::new(1, VehicleKind::Drone, map.base),
    ];
    let mut packages = vec![Package::new(0, Coord::new(7, 0), 700, 11, 0, 0)];

    hive.update(&mut vehicles, &mut packages, &map, 1);

    assert!(vehicles[1].is_busy(), "el dron gana el paquete caro y urgente");
    assert!(!vehicles[0].is_busy());
    assert!(packages[0].assigned);
}

#[test]
fn test_eviction_releases_carried_package() {
    let map = corridor_map();
    let hive = HiveMind::new();

    let mut vehicles = vec![Vehicle::new(0, VehicleKind::Robot, Coord::new(5, 0))];
    let mut packages = vec![Package::new(0, Coord::new(9, 0), 500, 30, 0, 0)];
    vehicles[0].assign_task(0, map.base);
    packages[0].assigned = true;
    vehicles[0].battery = 15.0; // 5%

    hive.update(&mut vehicles, &mut packages, &map, 2);

    assert!(!vehicles[0].is_busy());
    assert!(!packages[0].assigned, "la mision vuelve al pool");
    assert_eq!(vehicles[0].target, map.base);
}

#[test]
fn test_custom_params_shift_critical_threshold() {
    let map = corridor_map();
    let params = OptimizationParams {
        critical_battery_threshold: 50.0,
        ..Default::default()
    };
    let hive = HiveMind::with_params(params);
    assert_eq!(hive.params().critical_battery_threshold, 50.0);

    let mut vehicles = vec![Vehicle::new(0, VehicleKind::Drone, Coord::new(5, 0))];
    vehicles[0].battery = 40.0;
    let mut packages = Vec::new();

    hive.update(&mut vehicles, &mut packages, &map, 1);

    // con el umbral subido al 50%, un 40% ya es critico
    assert_eq!(vehicles[0].target, map.base);
    assert_eq!(vehicles[0].state, VehicleState::Moving);
}

#[test]
fn test_nearest_charger_prefers_station() {
    let map = GridMap::from_ascii("B.........\n..........\n.......S..").expect("mapa de prueba valido");
    let hive = HiveMind::new();

    let mut vehicles = vec![Vehicle::new(0, VehicleKind::Scooter, Coord::new(9, 2))];
    vehicles[0].battery = 20.0; // 10%
    let mut packages = Vec::new();

    hive.update(&mut vehicles, &mut packages, &map, 1);

    assert_eq!(vehicles[0].target, Coord::new(7, 2), "la estacion queda mas cerca que la base");
}
