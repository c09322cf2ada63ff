//! Command implementations for the darkstrip CLI

pub mod config;
pub mod strip;
