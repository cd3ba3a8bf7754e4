use std::fmt;

use crate::error::LifeError;
use crate::grid::{Grid, Rules};

/// Fill density used by `reseed` until a `randomize` call overrides it.
const DEFAULT_DENSITY: f64 = 0.5;

/// The simulation engine: a toroidal grid advanced one generation at a time.
///
/// Uses double-buffered cell storage: each `advance` reads the current
/// buffer and writes the next generation into an equally-sized scratch
/// buffer, then the two swap. Mutating a single buffer in place would let
/// cells evaluated late in the pass see already-updated neighbors, so the
/// second buffer is a correctness requirement, not an optimization.
pub struct Simulation {
    grid: Grid,
    /// Next-generation buffer; after each step it holds the previous
    /// generation and is reused as scratch on the following call.
    scratch: Vec<u8>,
    rules: Rules,
    density: f64,
    generation: u64,
}

impl Simulation {
    /// Create an engine over an all-dead `width` x `height` grid.
    pub fn new(width: u32, height: u32) -> Result<Self, LifeError> {
        let grid = Grid::new(width, height)?;
        let scratch = vec![0u8; grid.len_bytes()];
        Ok(Self {
            grid,
            scratch,
            rules: Rules::conway(),
            density: DEFAULT_DENSITY,
            generation: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Number of completed `advance` calls since construction.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The active rule set.
    pub fn rules(&self) -> Rules {
        self.rules
    }

    /// Swap the active rule set. Takes effect on the next `advance`.
    pub fn set_rules(&mut self, rules: Rules) {
        self.rules = rules;
    }

    /// Count of live cells in the current generation.
    pub fn population(&self) -> u64 {
        self.grid.population()
    }

    /// Advance the simulation by one generation.
    ///
    /// Each cell's 8 Moore neighbors are looked up with toroidal wraparound,
    /// so edge cells need no special casing and the lookup never fails. The
    /// result is deterministic: identical buffers always evolve identically.
    pub fn advance(&mut self) {
        let w = self.grid.width() as i32;
        let h = self.grid.height() as i32;

        self.scratch.fill(0);
        for row in 0..h {
            for col in 0..w {
                let mut count = 0u32;
                for dr in -1..=1 {
                    for dc in -1..=1 {
                        if dr == 0 && dc == 0 {
                            continue;
                        }
                        count += u32::from(self.grid.get_wrapped(row + dr, col + dc));
                    }
                }

                let alive = self.grid.get_wrapped(row, col);
                let next_alive = if alive {
                    (self.rules.survival >> count) & 1 == 1
                } else {
                    (self.rules.birth >> count) & 1 == 1
                };
                if next_alive {
                    let idx = (row * w + col) as usize;
                    self.scratch[idx >> 3] |= 1 << (idx & 7);
                }
            }
        }

        // The old buffer becomes next call's scratch; no reallocation.
        self.grid.swap_buffer(&mut self.scratch);
        self.generation += 1;
        log::trace!(
            "generation {} population {}",
            self.generation,
            self.grid.population()
        );
    }

    /// Zero-copy view of the current generation's packed cell buffer.
    ///
    /// Byte `i` holds cells `8i..8i+7`, least-significant bit first; the
    /// length is exactly `ceil(width * height / 8)`. The borrow is tied to
    /// the engine, so the view cannot outlive the next mutating call
    /// (`advance`, `toggle`, `stamp`, `reseed`, `clear`, ...) - the compiler
    /// enforces the validity window.
    pub fn buffer_view(&self) -> &[u8] {
        self.grid.as_bytes()
    }

    /// Flip one cell. Rejects out-of-range coordinates with `OutOfRange`.
    pub fn toggle(&mut self, row: u32, col: u32) -> Result<(), LifeError> {
        self.grid.toggle(row, col)
    }

    /// Set one cell alive. Coordinates wrap modulo the grid dimensions, the
    /// same addressing the neighbor count uses, so stamping near an edge
    /// lands on the far side instead of being dropped or rejected.
    pub fn set_alive(&mut self, row: i32, col: i32) {
        self.grid.set_wrapped(row, col, true);
    }

    /// Stamp a pattern of `(row, col)` offsets alive relative to an origin.
    /// Offsets wrap modulo the grid dimensions.
    pub fn stamp(&mut self, pattern: &[(i32, i32)], origin_row: i32, origin_col: i32) {
        for &(dr, dc) in pattern {
            self.set_alive(origin_row + dr, origin_col + dc);
        }
    }

    /// Re-randomize the grid at the last-used fill density.
    pub fn reseed(&mut self) {
        self.grid.randomize(self.density);
    }

    /// Randomize the grid at the given density and remember it for `reseed`.
    pub fn randomize(&mut self, density: f64) {
        self.density = density;
        self.grid.randomize(density);
    }

    /// Kill every cell.
    pub fn clear(&mut self) {
        self.grid.clear();
    }
}

impl fmt::Display for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..self.grid.height() as i32 {
            for col in 0..self.grid.width() as i32 {
                let symbol = if self.grid.get_wrapped(row, col) {
                    '◼'
                } else {
                    '◻'
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
