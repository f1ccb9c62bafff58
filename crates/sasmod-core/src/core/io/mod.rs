//! Reading q grids from disk and writing evaluated curves as CSV.

pub mod curve;
