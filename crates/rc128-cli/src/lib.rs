//! Command-line front end for the RC 128 document navigator.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
pub mod types;
