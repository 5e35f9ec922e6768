pub mod busco;
pub mod cli;
pub mod commands;
pub mod supermatrix;
pub mod utils;
