pub mod coordinate;
pub mod geometry;
