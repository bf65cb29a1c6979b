//! Application layer: the bridge that forwards each terminal operation to the
//! native executor, and the session that gates those operations on the
//! initialized/connected state.

pub mod bridge;
pub mod session;
