//! gyrocompass_core - Pure no_std orientation logic for gyrocompass
//!
//! This crate contains the platform-agnostic part of the compass/barrel
//! display: turning raw gyroscope, accelerometer and magnetometer samples
//! into an azimuth, roll and pitch. It has no I/O and can be tested on host
//! without any feature flags.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives
//! - **Pure no_std**: No std library dependencies
//! - **Trait abstractions**: Renderers plug in via [`traits::OrientationObserver`]
//!
//! # Modules
//!
//! - [`sensor`]: Sensor kinds, tri-axis samples and tagged events
//! - [`rotation`]: Rotation matrix from gravity and geomagnetic vectors
//! - [`orientation`]: Orientation state and the `ingest` operation
//! - [`display`]: Compass dial and barrel indicator display model
//! - [`angle`]: Degree/radian helpers
//! - [`traits`]: Observer abstraction for orientation updates

#![no_std]

pub mod angle;
pub mod display;
pub mod orientation;
pub mod rotation;
pub mod sensor;
pub mod traits;

pub use orientation::{ingest, AzimuthUpdate, IngestOutcome, OrientationState};
pub use sensor::{SensorEvent, SensorKind, TriAxisSample};
