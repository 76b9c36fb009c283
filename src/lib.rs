pub mod utils;
pub mod detector;
pub mod pipeline;
pub mod config;
pub mod helper;
pub mod modules;
