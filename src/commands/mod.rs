pub mod config;
pub mod digest;
pub mod stdio;

mod common;
