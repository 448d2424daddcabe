//! ATC run profile library
//!
//! Turns train telemetry logs into per-run speed and distance profiles:
//! telemetry rows are read through a header-bound column map, sorted per
//! train controller, joined with a block lookup table, segmented into runs
//! and exported as one CSV file per run.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod join;
pub mod limits;
pub mod logging;
pub mod lookup;
pub mod pipeline;
pub mod profile;
pub mod summary;
pub mod telemetry;
pub mod text;

pub use config::Config;
pub use error::{ErrorKind, ProfileError, Rejection};
pub use pipeline::{run_pipeline, PipelineReport, PipelineSettings};
