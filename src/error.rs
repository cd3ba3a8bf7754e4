use thiserror::Error;

/// Errors surfaced by the grid store and the simulation's mutation API.
///
/// Neighbor lookups during evolution never fail: they wrap toroidally by
/// construction. Only direct addressing (`get`/`set`/`toggle`) and
/// construction can reject their inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LifeError {
    #[error("cell ({row}, {col}) is outside the {width}x{height} grid")]
    OutOfRange {
        row: u32,
        col: u32,
        width: u32,
        height: u32,
    },

    #[error("invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}
