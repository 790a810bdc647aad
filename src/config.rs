// configuracion global de la simulacion
// formato de archivo: "CLAVE: valor" o "CLAVE valor", comentarios con //

use crate::error::ConfigError;
use std::fs;
use std::str::FromStr;
use std::sync::OnceLock;

static INSTANCE: OnceLock<Config> = OnceLock::new();

#[derive(Clone, Debug)]
pub struct Config {
    pub map_height: i32,
    pub map_width: i32,
    pub max_ticks: i32,
    pub max_stations: u32,
    pub clients_count: u32,
    pub drones: u32,
    pub robots: u32,
    pub scooters: u32,
    pub total_packages: usize,
    pub spawn_frequency: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map_height: 20,
            map_width: 20,
            max_ticks: 500,
            max_stations: 3,
            clients_count: 5,
            drones: 2,
            robots: 3,
            scooters: 2,
            total_packages: 20,
            spawn_frequency: 5,
        }
    }
}

fn parse_value<T: FromStr>(
    parts: &mut std::str::SplitWhitespace,
    line: usize,
    raw: &str,
) -> Result<T, ConfigError> {
    parts
        .next()
        .and_then(|tok| tok.parse::<T>().ok())
        .ok_or_else(|| ConfigError::Parse {
            line,
            text: raw.trim().to_string(),
        })
}

impl Config {
    /// lee y valida el archivo; cualquier falla es fatal para el proceso
    pub fn load_from_file(path: &str) -> Result<Config, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;

        // arranca en cero: una clave ausente no pasa la validacion
        let mut cfg = Config {
            map_height: 0,
            map_width: 0,
            max_ticks: 0,
            max_stations: 0,
            clients_count: 0,
            drones: 0,
            robots: 0,
            scooters: 0,
            total_packages: 0,
            spawn_frequency: 0,
        };

        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            let mut parts = line.split_whitespace();
            let Some(key) = parts.next() else { continue };
            let key = key.trim_end_matches(':');
            let line_no = i + 1;

            match key {
                "MAP_SIZE" => {
                    cfg.map_height = parse_value(&mut parts, line_no, raw)?;
                    cfg.map_width = parse_value(&mut parts, line_no, raw)?;
                }
                "MAX_TICKS" => cfg.max_ticks = parse_value(&mut parts, line_no, raw)?,
                "MAX_STATIONS" => cfg.max_stations = parse_value(&mut parts, line_no, raw)?,
                "CLIENTS_COUNT" => cfg.clients_count = parse_value(&mut parts, line_no, raw)?,
                "DRONES" => cfg.drones = parse_value(&mut parts, line_no, raw)?,
                "ROBOTS" => cfg.robots = parse_value(&mut parts, line_no, raw)?,
                "SCOOTERS" => cfg.scooters = parse_value(&mut parts, line_no, raw)?,
                "TOTAL_PACKAGES" => cfg.total_packages = parse_value(&mut parts, line_no, raw)?,
                "SPAWN_FREQUENCY" => cfg.spawn_frequency = parse_value(&mut parts, line_no, raw)?,
                // claves desconocidas se ignoran
                _ => {}
            }
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// dimensiones o frecuencias en cero dejarian el tick loop indefinido
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.map_height < 1 {
            return Err(ConfigError::Invalid { key: "MAP_SIZE", value: self.map_height as i64 });
        }
        if self.map_width < 1 {
            return Err(ConfigError::Invalid { key: "MAP_SIZE", value: self.map_width as i64 });
        }
        if self.max_ticks < 1 {
            return Err(ConfigError::Invalid { key: "MAX_TICKS", value: self.max_ticks as i64 });
        }
        if self.spawn_frequency < 1 {
            return Err(ConfigError::Invalid {
                key: "SPAWN_FREQUENCY",
                value: self.spawn_frequency as i64,
            });
        }
        Ok(())
    }

    /// instala el singleton del proceso; se llama una sola vez antes de
    /// arrancar cualquier simulacion y despues es solo lectura
    pub fn install(self) -> &'static Config {
        INSTANCE.get_or_init(|| self)
    }
}
