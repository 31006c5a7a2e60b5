//! Backend implementations.

pub mod cpu;
