// BFS de siguiente paso sobre el grid
// el scratch es thread-local y se reutiliza entre llamadas: en vez de
// limpiar visited se marca con un run token que se incrementa por corrida

use crate::model::{Cell, Coord, GridMap};
use std::cell::RefCell;

struct BfsScratch {
    visited: Vec<u32>,
    parent: Vec<i32>,
    queue: Vec<i32>,
    run_token: u32,
}

impl BfsScratch {
    fn new() -> Self {
        Self {
            visited: Vec::new(),
            parent: Vec::new(),
            queue: Vec::new(),
            run_token: 0,
        }
    }

    /// redimensiona al area del mapa actual; solo pasa al cambiar de mapa
    fn ensure_area(&mut self, area: usize) {
        if self.visited.len() != area {
            self.visited = vec![0; area];
            self.parent = vec![-1; area];
            self.queue = vec![0; area];
            self.run_token = 0;
        }
    }
}

thread_local! {
    static SCRATCH: RefCell<BfsScratch> = RefCell::new(BfsScratch::new());
}

const DX: [i32; 4] = [0, 0, -1, 1];
const DY: [i32; 4] = [-1, 1, 0, 0];

/// vecino de `start` sobre algun camino minimo 4-conexo hacia `target`;
/// devuelve `start` si ya llegamos o si no existe camino
pub fn next_step(start: Coord, target: Coord, map: &GridMap) -> Coord {
    if start == target {
        return start;
    }

    let w = map.width;
    let h = map.height;
    let area = (w * h) as usize;

    SCRATCH.with(|scratch| {
        let mut s = scratch.borrow_mut();
        s.ensure_area(area);

        s.run_token = s.run_token.wrapping_add(1);
        if s.run_token == 0 {
            s.visited.fill(0);
            s.run_token = 1;
        }
        let token = s.run_token;

        let start_idx = (start.y * w + start.x) as usize;
        let target_idx = (target.y * w + target.x) as usize;

        let mut head = 0usize;
        let mut tail = 0usize;
        s.queue[tail] = start_idx as i32;
        tail += 1;
        s.visited[start_idx] = token;
        s.parent[start_idx] = -1;

        let mut found = false;
        while head < tail {
            let current = s.queue[head];
            head += 1;

            if current as usize == target_idx {
                found = true;
                break;
            }

            let cx = current % w;
            let cy = current / w;

            for i in 0..4 {
                let nx = cx + DX[i];
                let ny = cy + DY[i];
                if nx < 0 || nx >= w || ny < 0 || ny >= h {
                    continue;
                }
                if map.cell(nx, ny) == Cell::Wall {
                    continue;
                }
                let nidx = (ny * w + nx) as usize;
                if s.visited[nidx] != token {
                    s.visited[nidx] = token;
                    s.parent[nidx] = current;
                    s.queue[tail] = nidx as i32;
                    tail += 1;
                }
            }
        }

        if !found {
            return start;
        }

        // retrocede por los padres hasta el primer paso despues de start
        let mut curr = target_idx as i32;
        let mut prev = curr;
        while curr as usize != start_idx {
            prev = curr;
            curr = s.parent[curr as usize];
        }
        Coord::new(prev % w, prev / w)
    })
}
