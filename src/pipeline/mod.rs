pub mod pipeline;
pub mod result;
