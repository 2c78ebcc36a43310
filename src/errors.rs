//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`RigError`] covers:
//! - Capacity limits on bounded keyframe tracks and child lists
//! - Degenerate interpolation segments (coincident keyframe times)
//! - Ordering violations, both at build time (keyframe times) and at frame
//!   time (solving or reading globals out of pipeline order)
//! - Stale node handles
//!
//! # Propagation
//!
//! Build-time violations are returned as `Err` and leave the structure they
//! targeted unchanged. Frame-time anomalies never abort the frame: the
//! operation still runs and the anomaly is reported through the returned
//! [`Result`] and a `log::warn!`.
//!
//! ```rust,ignore
//! use keyrig::errors::{RigError, Result};
//!
//! fn build() -> Result<()> {
//!     let mut clip = AnimationClip::new("torso");
//!     clip.add_keyframe(0.0, Vec3::ZERO, Quat::IDENTITY, Vec3::ONE)?;
//!     Ok(())
//! }
//! ```

use std::fmt;

use thiserror::Error;

use crate::scene::NodeHandle;

/// Which bounded collection overflowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapacityKind {
    /// Keyframes of a bounded track.
    Keyframes,
    /// Children of a node with a declared child capacity.
    Children,
}

impl fmt::Display for CapacityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityKind::Keyframes => f.write_str("Keyframe"),
            CapacityKind::Children => f.write_str("Child"),
        }
    }
}

/// The ways the build order or the frame pipeline order can be broken.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum OrderingViolation {
    /// A keyframe was inserted with a time earlier than its predecessor.
    #[error("keyframe time {time} precedes previous keyframe time {previous}")]
    KeyframeTime {
        /// Time of the last keyframe already in the track
        previous: f32,
        /// Rejected time
        time: f32,
    },

    /// `solve` ran twice without an `update` in between.
    #[error("solve invoked without a preceding update")]
    SolveWithoutUpdate,

    /// Global transforms were read after an update or an edit but before
    /// the matching solve.
    #[error("global transforms read before solve")]
    ReadBeforeSolve,
}

/// The main error type for the crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RigError {
    // ========================================================================
    // Construction Errors
    // ========================================================================
    /// A bounded track or child list is full.
    #[error("{kind} capacity exceeded (capacity: {capacity})")]
    CapacityExceeded {
        /// Which collection overflowed
        kind: CapacityKind,
        /// The declared capacity
        capacity: usize,
    },

    /// Keyframe time is NaN, infinite or negative.
    #[error("Invalid keyframe time: {0}")]
    InvalidKeyframeTime(f32),

    /// The handle does not refer to a live node.
    #[error("Node not found: {0:?}")]
    NodeNotFound(NodeHandle),

    // ========================================================================
    // Interpolation & Ordering Errors
    // ========================================================================
    /// Two consecutive keyframes share the same time, so the interpolation
    /// parameter is undefined.
    #[error("Degenerate interpolation: consecutive keyframes share time {time}")]
    DegenerateInterpolation {
        /// The shared time
        time: f32,
    },

    /// Build or frame order was violated.
    #[error("Ordering violation: {0}")]
    OrderingViolation(#[from] OrderingViolation),
}

/// Alias for `Result<T, RigError>`.
pub type Result<T> = std::result::Result<T, RigError>;
