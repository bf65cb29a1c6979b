//! Domain types shared by every layer: device configuration, transaction
//! requests and responses, and the native executor port.

pub mod config;
pub mod ports;
pub mod response;
pub mod transaction;
