//! connprobe CLI - validate database descriptors from the command line or
//! serve the HTTP endpoint.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
