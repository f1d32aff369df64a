// src/data_input/mod.rs

pub mod bench_log;
pub mod log_parser;
pub mod test_matrix;

// src/data_input/mod.rs
