//! Test support utilities for posture-watch.
//!
//! Provides mocks for every port and a builder for synthetic landmark frames.
//!
//! # Example
//!
//! ```
//! use posture_watch_test_support::{LandmarkFrameBuilder, MockLandmarkSource};
//!
//! let frames = vec![
//!     LandmarkFrameBuilder::upright().at(0.0).build(),
//!     LandmarkFrameBuilder::slouched().at(1.0).build(),
//! ];
//! let source = MockLandmarkSource::new(frames);
//! ```

mod builders;
mod mocks;

pub use builders::LandmarkFrameBuilder;
pub use mocks::{
    FailingPostureLog, LoggedPosture, MockLandmarkSource, MockNotifier, MockPostureLog,
    MockProgressSink, MockResultOutput,
};
