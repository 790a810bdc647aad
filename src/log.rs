// logger por simulacion; en benchmark queda deshabilitado
// cada evento lleva el prefijo [TICK n]

use std::fs::File;
use std::io::{self, BufWriter, Write};

pub struct SimLogger {
    out: Option<BufWriter<File>>,
}

impl SimLogger {
    pub fn disabled() -> Self {
        Self { out: None }
    }

    pub fn to_file(path: &str) -> io::Result<Self> {
        Ok(Self {
            out: Some(BufWriter::new(File::create(path)?)),
        })
    }

    #[inline]
    pub fn enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn event(&mut self, tick: i32, message: &str) {
        if let Some(out) = self.out.as_mut() {
            let _ = writeln!(out, "[TICK {}] {}", tick, message);
        }
    }
}

#[macro_export]
macro_rules! sim_log {
    ($logger:expr, $tick:expr, $($arg:tt)*) => {{
        if $logger.enabled() {
            $logger.event($tick, &format!($($arg)*));
        }
    }};
}
