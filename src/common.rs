pub mod common_values;
pub mod misc;
