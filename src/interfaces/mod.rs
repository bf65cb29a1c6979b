//! Batch input and output for the command-line runner.

pub mod csv;
pub mod result_writer;
