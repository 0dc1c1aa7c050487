//! Platform-agnostic trait abstractions
//!
//! - [`OrientationObserver`]: receives orientation updates (renderer boundary)

pub mod observer;

pub use observer::{OrientationObserver, RecordingObserver};
