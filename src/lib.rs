//! Conway's Game of Life on a fixed-size toroidal grid.
//!
//! Cell state is bit-packed, one cell per bit, LSB-first, so the current
//! generation can be handed to a renderer as a raw `&[u8]` view with no
//! per-frame copy. Evolution is double-buffered: each step writes into a
//! scratch buffer and swaps, so neighbor counts never read half-updated
//! state. The engine does no threading and no scheduling of its own; an
//! external driver decides when to call [`Simulation::advance`].

pub mod error;
pub mod grid;
pub mod simulation;
pub mod stats;

pub use error::LifeError;
pub use grid::{Grid, Rules};
pub use simulation::Simulation;
pub use stats::Stats;
