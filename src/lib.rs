//! gyrocompass - compass heading and barrel roll/pitch indicator
//!
//! Host side of gyrocompass: reads recorded sensor samples, drives the
//! orientation estimator from `gyrocompass_core`, and renders the result.

pub mod config;
pub mod error;
pub mod render;
pub mod session;
pub mod source;

pub use config::AppConfig;
pub use error::{ConfigError, Error, Result, SourceError};
pub use render::ConsoleRenderer;
pub use session::{IngestStats, Session};
pub use source::{JsonLinesSource, SampleRecord, SampleSource, VecSource};
