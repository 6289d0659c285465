//! `bh-curves` library crate.
//!
//! The binary (`bh`) is a thin wrapper around this library so that:
//!
//! - the conditioning/extraction pipeline is testable without spawning processes
//! - modules are reusable (e.g., future GUI front-ends, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod features;
pub mod filter;
pub mod gapfill;
pub mod io;
pub mod math;
pub mod report;
pub mod resample;
