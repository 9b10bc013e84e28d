//! Runtime configuration for the demo tooling.

pub mod split;
