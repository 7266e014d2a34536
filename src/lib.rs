// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod specs;

pub mod csv;
pub mod file;
pub mod progress;
pub mod reconcile;
pub mod runner;
pub mod schema;
pub mod scrape;
pub mod store;
