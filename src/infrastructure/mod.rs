//! Native executor implementations.

pub mod simulated;
