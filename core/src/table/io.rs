//! Utilities for reading tables.

pub mod read;
pub mod text;
