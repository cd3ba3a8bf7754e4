use rand::Rng;

use crate::error::LifeError;

/// Rules defining the dynamical system. Standard Conway is B3/S23.
///
/// The neighborhood is always Moore radius 1 (8 toroidal neighbors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rules {
    /// Bitmask: bit `i` set means a dead cell with `i` neighbors becomes alive.
    pub birth: u32,
    /// Bitmask: bit `i` set means a live cell with `i` neighbors survives.
    pub survival: u32,
}

impl Rules {
    /// Standard Conway's Game of Life: B3/S23
    pub fn conway() -> Self {
        Self {
            birth: 1 << 3,
            survival: (1 << 2) | (1 << 3),
        }
    }

    /// HighLife: B36/S23 - known for its replicator pattern
    pub fn highlife() -> Self {
        Self {
            birth: (1 << 3) | (1 << 6),
            survival: (1 << 2) | (1 << 3),
        }
    }

    /// Day & Night: B3678/S34678 - symmetric under on/off inversion
    pub fn day_and_night() -> Self {
        Self {
            birth: (1 << 3) | (1 << 6) | (1 << 7) | (1 << 8),
            survival: (1 << 3) | (1 << 4) | (1 << 6) | (1 << 7) | (1 << 8),
        }
    }

    /// Seeds: B2/S (no survival) - every cell dies, only birth
    pub fn seeds() -> Self {
        Self {
            birth: 1 << 2,
            survival: 0,
        }
    }

    /// Life without Death: B3/S012345678 - cells never die
    pub fn life_without_death() -> Self {
        Self {
            birth: 1 << 3,
            survival: 0x1FF, // bits 0-8 all set
        }
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::conway()
    }
}

/// Upper bound on `width * height`; keeps cell indices comfortably inside
/// `u32` and `usize` arithmetic on every target.
const MAX_CELLS: u64 = 1 << 30;

/// Bit-packed grid state: one cell per bit, row-major, LSB-first.
///
/// Cell `n = row * width + col` lives in byte `n / 8` at bit position
/// `n % 8`. The buffer is exactly `ceil(width * height / 8)` bytes long and
/// every bit past `width * height - 1` in the last byte stays zero, so the
/// raw bytes can be handed to a renderer as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<u8>,
}

impl Grid {
    /// Create an all-dead grid. Dimensions are fixed for the grid's lifetime.
    pub fn new(width: u32, height: u32) -> Result<Self, LifeError> {
        let total = width as u64 * height as u64;
        if width == 0 || height == 0 || total > MAX_CELLS {
            return Err(LifeError::InvalidDimensions { width, height });
        }
        let len = (total as usize + 7) / 8;
        Ok(Self {
            width,
            height,
            cells: vec![0u8; len],
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of cells in the grid (`width * height`).
    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// Length of the packed buffer in bytes: `ceil(width * height / 8)`.
    pub fn len_bytes(&self) -> usize {
        self.cells.len()
    }

    /// The packed cell buffer. Byte `i` holds cells `8i..8i+7`, LSB first.
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    fn index(&self, row: u32, col: u32) -> usize {
        (row * self.width + col) as usize
    }

    fn bit(&self, idx: usize) -> bool {
        (self.cells[idx >> 3] >> (idx & 7)) & 1 == 1
    }

    fn set_bit(&mut self, idx: usize, alive: bool) {
        if alive {
            self.cells[idx >> 3] |= 1 << (idx & 7);
        } else {
            self.cells[idx >> 3] &= !(1 << (idx & 7));
        }
    }

    fn check_bounds(&self, row: u32, col: u32) -> Result<(), LifeError> {
        if row >= self.height || col >= self.width {
            return Err(LifeError::OutOfRange {
                row,
                col,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Get a single cell. Rejects out-of-range coordinates.
    pub fn get(&self, row: u32, col: u32) -> Result<bool, LifeError> {
        self.check_bounds(row, col)?;
        Ok(self.bit(self.index(row, col)))
    }

    /// Set a single cell. Rejects out-of-range coordinates.
    pub fn set(&mut self, row: u32, col: u32, alive: bool) -> Result<(), LifeError> {
        self.check_bounds(row, col)?;
        let idx = self.index(row, col);
        self.set_bit(idx, alive);
        Ok(())
    }

    /// Flip a single cell. Rejects out-of-range coordinates.
    pub fn toggle(&mut self, row: u32, col: u32) -> Result<(), LifeError> {
        self.check_bounds(row, col)?;
        let idx = self.index(row, col);
        self.cells[idx >> 3] ^= 1 << (idx & 7);
        Ok(())
    }

    /// Get cell state with toroidal wrapping; any signed coordinate is valid.
    pub fn get_wrapped(&self, row: i32, col: i32) -> bool {
        let w = self.width as i32;
        let h = self.height as i32;
        let wr = ((row % h) + h) % h;
        let wc = ((col % w) + w) % w;
        self.bit((wr * w + wc) as usize)
    }

    /// Set cell state with toroidal wrapping; any signed coordinate is valid.
    pub fn set_wrapped(&mut self, row: i32, col: i32, alive: bool) {
        let w = self.width as i32;
        let h = self.height as i32;
        let wr = ((row % h) + h) % h;
        let wc = ((col % w) + w) % w;
        self.set_bit((wr * w + wc) as usize, alive);
    }

    /// Fill with random cells at the given density (0.0 = empty, 1.0 = full).
    pub fn randomize(&mut self, density: f64) {
        let mut rng = rand::thread_rng();
        self.cells.fill(0);
        for idx in 0..self.cell_count() {
            if rng.gen_range(0.0..1.0) < density {
                self.cells[idx >> 3] |= 1 << (idx & 7);
            }
        }
    }

    /// Clear all cells.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Count live cells. Padding bits are always zero, so a plain popcount
    /// over the buffer is exact.
    pub fn population(&self) -> u64 {
        self.cells.iter().map(|b| b.count_ones() as u64).sum()
    }

    /// Swap the packed buffer with an equally-sized scratch buffer.
    pub(crate) fn swap_buffer(&mut self, scratch: &mut Vec<u8>) {
        debug_assert_eq!(scratch.len(), self.cells.len());
        std::mem::swap(&mut self.cells, scratch);
    }
}

// ── Predefined patterns ──
//
// Offsets are `(row, col)` relative to the stamp origin; negative offsets
// wrap around the torus when stamped near an edge.

/// Glider: small pattern that travels one cell down-right every 4 generations.
pub fn pattern_glider() -> Vec<(i32, i32)> {
    vec![(-1, 0), (0, 1), (1, -1), (1, 0), (1, 1)]
}

/// R-pentomino: a methuselah that runs for 1103 generations.
pub fn pattern_r_pentomino() -> Vec<(i32, i32)> {
    vec![(-1, 0), (-1, 1), (0, -1), (0, 0), (1, 0)]
}

/// Acorn: a methuselah that takes 5206 generations to stabilize.
pub fn pattern_acorn() -> Vec<(i32, i32)> {
    vec![(0, -3), (0, -2), (-2, -2), (-1, 0), (0, 1), (0, 2), (0, 3)]
}

/// Gosper glider gun: infinite growth pattern.
pub fn pattern_gosper_gun() -> Vec<(i32, i32)> {
    vec![
        // Left block
        (0, -18), (1, -18), (0, -17), (1, -17),
        // Left ship
        (0, -8), (1, -8), (2, -8), (-1, -7), (3, -7), (-2, -6), (4, -6),
        (-2, -5), (4, -5), (1, -4), (-1, -3), (3, -3), (0, -2), (1, -2),
        (2, -2), (1, -1),
        // Right ship
        (0, 2), (-1, 2), (-2, 2), (0, 3), (-1, 3), (-2, 3), (-3, 4),
        (1, 4), (-4, 6), (-3, 6), (1, 6), (2, 6),
        // Right block
        (-1, 16), (-2, 16), (-1, 17), (-2, 17),
    ]
}

/// Lightweight spaceship (LWSS).
pub fn pattern_lwss() -> Vec<(i32, i32)> {
    vec![
        (-1, -2), (-2, -1), (-2, 0), (-2, 1), (-2, 2),
        (-1, 2), (0, 2), (1, 1), (0, -2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_new() {
        let grid = Grid::new(100, 100).unwrap();
        assert_eq!(grid.cell_count(), 10000);
        assert_eq!(grid.len_bytes(), 1250);
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_buffer_length_rounds_up() {
        assert_eq!(Grid::new(1, 1).unwrap().len_bytes(), 1);
        assert_eq!(Grid::new(3, 3).unwrap().len_bytes(), 2);
        assert_eq!(Grid::new(10, 10).unwrap().len_bytes(), 13);
        assert_eq!(Grid::new(8, 8).unwrap().len_bytes(), 8);
    }

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Grid::new(0, 10),
            Err(LifeError::InvalidDimensions {
                width: 0,
                height: 10
            })
        );
        assert_eq!(
            Grid::new(10, 0),
            Err(LifeError::InvalidDimensions {
                width: 10,
                height: 0
            })
        );
        assert!(Grid::new(1 << 16, 1 << 16).is_err());
    }

    #[test]
    fn test_grid_set_get() {
        let mut grid = Grid::new(10, 10).unwrap();
        grid.set(3, 4, true).unwrap();
        assert!(grid.get(3, 4).unwrap());
        assert!(!grid.get(0, 0).unwrap());
        grid.set(3, 4, false).unwrap();
        assert!(!grid.get(3, 4).unwrap());
    }

    #[test]
    fn test_out_of_range() {
        let mut grid = Grid::new(10, 5).unwrap();
        assert_eq!(
            grid.get(5, 0),
            Err(LifeError::OutOfRange {
                row: 5,
                col: 0,
                width: 10,
                height: 5
            })
        );
        assert!(grid.set(0, 10, true).is_err());
        assert!(grid.toggle(99, 99).is_err());
        // In-range edges are fine.
        assert!(grid.set(4, 9, true).is_ok());
    }

    #[test]
    fn test_grid_wrapping() {
        let mut grid = Grid::new(10, 10).unwrap();
        grid.set_wrapped(-1, -1, true);
        assert!(grid.get(9, 9).unwrap());
        grid.set_wrapped(10, 10, true);
        assert!(grid.get(0, 0).unwrap());
        assert!(grid.get_wrapped(-1, -1));
        assert!(grid.get_wrapped(19, 19));
    }

    #[test]
    fn test_bit_layout_lsb_first() {
        let mut grid = Grid::new(8, 2).unwrap();
        // Cell 0 -> byte 0, bit 0; cell 9 (row 1, col 1) -> byte 1, bit 1.
        grid.set(0, 0, true).unwrap();
        grid.set(1, 1, true).unwrap();
        assert_eq!(grid.as_bytes(), &[0b0000_0001, 0b0000_0010]);
    }

    #[test]
    fn test_toggle_is_involution() {
        let mut grid = Grid::new(10, 10).unwrap();
        grid.toggle(2, 7).unwrap();
        assert!(grid.get(2, 7).unwrap());
        grid.toggle(2, 7).unwrap();
        assert!(!grid.get(2, 7).unwrap());
    }

    #[test]
    fn test_grid_randomize() {
        let mut grid = Grid::new(100, 100).unwrap();
        grid.randomize(0.5);
        let pop = grid.population();
        // With 10000 cells at 50% density, population should be roughly 5000
        assert!(pop > 1000 && pop < 9000);
    }

    #[test]
    fn test_randomize_keeps_padding_zero() {
        // 10x10 = 100 cells over 13 bytes; bits 100..103 are padding.
        let mut grid = Grid::new(10, 10).unwrap();
        grid.randomize(1.0);
        assert_eq!(grid.population(), 100);
        assert_eq!(grid.as_bytes()[12], 0b0000_1111);
    }

    #[test]
    fn test_grid_clear() {
        let mut grid = Grid::new(10, 10).unwrap();
        grid.randomize(1.0);
        assert!(grid.population() > 0);
        grid.clear();
        assert_eq!(grid.population(), 0);
        assert!(grid.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_rules_conway() {
        let rules = Rules::conway();
        // Birth with exactly 3 neighbors
        assert_ne!(rules.birth & (1 << 3), 0);
        assert_eq!(rules.birth & (1 << 2), 0);
        // Survive with 2 or 3 neighbors
        assert_ne!(rules.survival & (1 << 2), 0);
        assert_ne!(rules.survival & (1 << 3), 0);
        assert_eq!(rules.survival & (1 << 4), 0);
    }

    #[test]
    fn test_rules_presets() {
        assert_eq!(Rules::default(), Rules::conway());
        assert_ne!(Rules::highlife().birth & (1 << 6), 0);
        assert_eq!(Rules::seeds().survival, 0);
        assert_eq!(Rules::life_without_death().survival, 0x1FF);
    }

    #[test]
    fn test_pattern_sizes() {
        assert_eq!(pattern_glider().len(), 5);
        assert_eq!(pattern_r_pentomino().len(), 5);
        assert_eq!(pattern_acorn().len(), 7);
        assert_eq!(pattern_lwss().len(), 9);
        assert_eq!(pattern_gosper_gun().len(), 36);
    }
}
