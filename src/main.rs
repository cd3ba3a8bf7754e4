use std::time::Instant;

use torus_life::{Simulation, Stats};

/// Grid width in cells.
const GRID_WIDTH: u32 = 256;

/// Grid height in cells.
const GRID_HEIGHT: u32 = 256;

/// Initial random fill density.
const INITIAL_DENSITY: f64 = 0.25;

/// How many generations the driver runs before exiting.
const GENERATIONS: u64 = 1_000;

/// Log a progress line every this many generations.
const REPORT_INTERVAL: u64 = 100;

fn main() {
    env_logger::init();

    log::info!(
        "torus-life headless driver: {}x{} grid, {} generations",
        GRID_WIDTH,
        GRID_HEIGHT,
        GENERATIONS
    );

    let mut sim = Simulation::new(GRID_WIDTH, GRID_HEIGHT).expect("invalid grid dimensions");
    sim.randomize(INITIAL_DENSITY);

    let mut stats = Stats::new(GRID_WIDTH as u64 * GRID_HEIGHT as u64);
    let start = Instant::now();

    for _ in 0..GENERATIONS {
        sim.advance();
        stats.record(sim.generation(), sim.population());

        if sim.generation() % REPORT_INTERVAL == 0 {
            log::info!(
                "gen {:>6}  population {:>8}  density {:.3}  ({:.0} gen/s)",
                sim.generation(),
                stats.latest_population(),
                stats.latest_density(),
                stats.gen_rate()
            );
        }
    }

    let elapsed = start.elapsed();
    let view = sim.buffer_view();
    log::info!(
        "{} generations in {:.2?} ({:.0} gen/s), final population {} in a {}-byte buffer",
        sim.generation(),
        elapsed,
        sim.generation() as f64 / elapsed.as_secs_f64(),
        sim.population(),
        view.len()
    );
}
