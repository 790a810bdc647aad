// harness de benchmark: corre simulaciones independientes repartidas
// entre los hilos de hardware; el unico estado compartido es el contador
// de progreso (atomico) y los totales (mutex al cerrar cada worker)

use crate::config::Config;
use crate::error::SimError;
use crate::sim::Simulation;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

/// iteraciones totales del benchmark
pub const TOTAL_ITERATIONS: usize = 100_000;

#[derive(Default)]
struct BenchTotals {
    profit: i64,
    survivors: i64,
    delivered: i64,
}

pub fn run_benchmark(cfg: &'static Config) {
    let num_threads = thread::available_parallelism().map(|n| n.get()).unwrap_or(4);

    println!("--- BENCHMARK MULTIHILO ---");
    println!("Sistema: {} nucleos detectados.", num_threads);
    println!("Tarea: {} simulaciones.", TOTAL_ITERATIONS);

    let progress = Arc::new(AtomicUsize::new(0));
    let totals = Arc::new(Mutex::new(BenchTotals::default()));

    let start = Instant::now();

    let per_thread = TOTAL_ITERATIONS / num_threads;
    let remainder = TOTAL_ITERATIONS % num_threads;

    let mut handles = Vec::with_capacity(num_threads);
    for i in 0..num_threads {
        let count = per_thread + if i == num_threads - 1 { remainder } else { 0 };
        let progress = Arc::clone(&progress);
        let totals = Arc::clone(&totals);
        handles.push(thread::spawn(move || worker(cfg, count, &progress, &totals)));
    }

    // el hilo principal solo dibuja el progreso
    loop {
        let current = progress.load(Ordering::Relaxed);
        let percent = current * 100 / TOTAL_ITERATIONS;
        print!("\rProgreso: [{}%] {}/{}", percent, current, TOTAL_ITERATIONS);
        let _ = std::io::stdout().flush();
        if current >= TOTAL_ITERATIONS {
            break;
        }
        thread::sleep(Duration::from_millis(100));
    }
    println!("\rProgreso: [100%] {}/{} Listo!", TOTAL_ITERATIONS, TOTAL_ITERATIONS);

    for handle in handles {
        let _ = handle.join();
    }

    let elapsed = start.elapsed().as_secs_f64();
    let totals = totals.lock().unwrap();

    println!("\n========================================");
    println!("RESULTADOS FINALES ({} hilos)", num_threads);
    println!("========================================");
    println!("Tiempo de ejecucion: {:.2} segundos", elapsed);
    println!(
        "Velocidad:           {} simulaciones/seg",
        (TOTAL_ITERATIONS as f64 / elapsed) as u64
    );
    println!("----------------------------------------");
    println!(
        "PROFIT PROMEDIO:     {:.2}",
        totals.profit as f64 / TOTAL_ITERATIONS as f64
    );
    println!(
        "SUPERVIVENCIA AVG:   {:.2}",
        totals.survivors as f64 / TOTAL_ITERATIONS as f64
    );
    println!(
        "ENTREGADOS AVG:      {:.2}",
        totals.delivered as f64 / TOTAL_ITERATIONS as f64
    );
    println!("========================================");
}

fn worker(cfg: &'static Config, count: usize, progress: &AtomicUsize, totals: &Mutex<BenchTotals>) {
    let mut local = BenchTotals::default();

    for _ in 0..count {
        // una iteracion caida se salta; el contador avanza igual
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut sim = Simulation::new(cfg, false)?;
            sim.run();
            Ok::<_, SimError>((
                sim.total_profit(),
                sim.vehicles_alive as i64,
                sim.packages_delivered as i64,
            ))
        }));

        if let Ok(Ok((profit, survivors, delivered))) = outcome {
            local.profit += profit;
            local.survivors += survivors;
            local.delivered += delivered;
        }
        progress.fetch_add(1, Ordering::Relaxed);
    }

    let mut totals = totals.lock().unwrap();
    totals.profit += local.profit;
    totals.survivors += local.survivors;
    totals.delivered += local.delivered;
}
