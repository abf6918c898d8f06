// src/lib.rs — Library root for Synapse

pub mod api;
pub mod cli;
pub mod core;
pub mod infra;
pub mod memory;
pub mod provider;
pub mod util;
