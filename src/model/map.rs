use crate::error::SimError;

use super::{Cell, Coord};

/// mapa rectangular, inmutable despues de la generacion
#[derive(Clone, Debug)]
pub struct GridMap {
    pub height: i32,
    pub width: i32,
    cells: Vec<Cell>,
    pub base: Coord,
    pub clients: Vec<Coord>,
    pub stations: Vec<Coord>,
}

impl GridMap {
    pub fn new(height: i32, width: i32) -> Self {
        Self {
            height,
            width,
            cells: vec![Cell::Empty; (height * width) as usize],
            base: Coord::new(0, 0),
            clients: Vec::new(),
            stations: Vec::new(),
        }
    }

    #[inline]
    fn idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// fuera del mapa se comporta como muro
    #[inline]
    pub fn cell(&self, x: i32, y: i32) -> Cell {
        if !self.in_bounds(x, y) {
            return Cell::Wall;
        }
        self.cells[self.idx(x, y)]
    }

    /// escribe la celda y mantiene los registros de base/clientes/estaciones
    pub fn set_cell(&mut self, x: i32, y: i32, cell: Cell) {
        if !self.in_bounds(x, y) {
            return;
        }
        let i = self.idx(x, y);
        self.cells[i] = cell;
        match cell {
            Cell::Base => self.base = Coord::new(x, y),
            Cell::Client => self.clients.push(Coord::new(x, y)),
            Cell::Station => self.stations.push(Coord::new(x, y)),
            _ => {}
        }
    }

    #[inline]
    pub fn is_charging_cell(&self, pos: Coord) -> bool {
        self.cell(pos.x, pos.y).is_charging()
    }

    #[inline]
    pub fn area(&self) -> i32 {
        self.height * self.width
    }

    /// grid como texto, una fila por linea
    pub fn render(&self) -> String {
        let mut out = String::with_capacity((self.area() + self.height) as usize);
        for y in 0..self.height {
            for x in 0..self.width {
                out.push(self.cell(x, y).to_char());
            }
            out.push('\n');
        }
        out
    }

    /// construye un mapa desde texto; util para escenarios fijos
    pub fn from_ascii(text: &str) -> Result<GridMap, SimError> {
        let rows: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        if rows.is_empty() {
            return Err(SimError::InvalidMap("mapa vacio".into()));
        }
        let height = rows.len() as i32;
        let width = rows[0].chars().count() as i32;

        let mut map = GridMap::new(height, width);
        let mut bases = 0;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as i32 != width {
                return Err(SimError::InvalidMap(format!("fila {} con ancho distinto", y)));
            }
            for (x, ch) in row.chars().enumerate() {
                let cell = Cell::from_char(ch)
                    .ok_or_else(|| SimError::InvalidMap(format!("celda desconocida '{}'", ch)))?;
                if cell == Cell::Base {
                    bases += 1;
                }
                map.set_cell(x as i32, y as i32, cell);
            }
        }
        if bases != 1 {
            return Err(SimError::InvalidMap(format!("se esperaba una base, hay {}", bases)));
        }
        Ok(map)
    }
}
