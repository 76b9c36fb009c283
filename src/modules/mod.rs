pub mod contour;
pub mod geometric;
pub mod measurement;
pub mod ratio;
