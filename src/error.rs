//! Error types for the `storyboard` crate.
//!
//! This module defines [`StoryboardError`], the unified error type returned by
//! all fallible operations in the crate. Segmentation itself never fails on
//! well-formed input; errors come from configuration ranges, subtitle parsing,
//! and report I/O.

use std::io::Error as IoError;

use serde_json::Error as JsonError;
use thiserror::Error;

/// The unified error type for all `storyboard` operations.
///
/// Keyword detection and location extraction are total and never produce an
/// error; absence of a match is a valid answer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StoryboardError {
    /// `min_duration` must be a finite number of seconds greater than zero.
    #[error("Invalid minimum scene duration: {0} (must be a finite value > 0 seconds)")]
    InvalidMinDuration(f64),

    /// `merge_threshold` must be a finite number of seconds, zero or more.
    #[error("Invalid merge threshold: {0} (must be a finite value >= 0 seconds)")]
    InvalidMergeThreshold(f64),

    /// SubRip input could not be parsed.
    #[error("Failed to parse subtitle input at line {line}: {reason}")]
    SubtitleParse {
        /// One-based line number where parsing failed.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// Structured output could not be serialized.
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] JsonError),
}
