// errores fatales del crate; las anomalias por tick se resuelven
// localmente y no pasan por aca

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no se pudo abrir la configuracion {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("linea {line} invalida en la configuracion: '{text}'")]
    Parse { line: usize, text: String },
    #[error("valor invalido para {key}: {value}")]
    Invalid { key: &'static str, value: i64 },
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("no se pudo generar un mapa conexo tras {attempts} intentos")]
    MapGeneration { attempts: u32 },
    #[error("mapa invalido: {0}")]
    InvalidMap(String),
}
