pub mod config;
pub mod game;
pub mod score;
pub mod snake;
pub mod state;
pub mod term;

/// Signed so that out-of-bounds head positions are representable.
pub type GridInt = i16;
pub type Cell = (GridInt, GridInt);
