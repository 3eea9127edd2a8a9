//! Infrastructure implementations.
//!
//! Contains port trait implementations for the payload source and output sink.

pub mod files;
pub mod ports;
