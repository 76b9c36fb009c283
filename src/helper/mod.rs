pub mod shape_helper;
