pub mod eval;
pub mod geometry;
pub mod info;
pub mod list;
