//! Segmentation configuration.
//!
//! [`SegmentOptions`] is a builder carrying the two thresholds that drive the
//! engine plus the keyword tables to classify with. Values are validated once,
//! before any cue is processed.
//!
//! # Example
//!
//! ```
//! use storyboard::SegmentOptions;
//!
//! let options = SegmentOptions::new()
//!     .with_min_duration(8.0)
//!     .with_merge_threshold(1.5);
//! assert!(options.validate().is_ok());
//!
//! let broken = SegmentOptions::new().with_min_duration(0.0);
//! assert!(broken.validate().is_err());
//! ```

use std::time::Duration;

use crate::error::StoryboardError;
use crate::lexicon::Lexicon;

/// Default minimum scene duration, in seconds.
pub const DEFAULT_MIN_DURATION: f64 = 5.0;

/// Default merge threshold, in seconds.
pub const DEFAULT_MERGE_THRESHOLD: f64 = 3.0;

/// Settings for a segmentation run.
#[derive(Debug, Clone, Copy)]
pub struct SegmentOptions {
    /// Minimum scene duration in seconds. Must be finite and `> 0`.
    pub min_duration: f64,
    /// Largest gap in seconds across which a short scene may absorb its
    /// successor. Must be finite and `>= 0`.
    pub merge_threshold: f64,
    /// Keyword tables used for boundaries, emotion, and location.
    pub lexicon: Lexicon,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentOptions {
    /// Create options with the default thresholds and builtin lexicon.
    pub fn new() -> Self {
        Self {
            min_duration: DEFAULT_MIN_DURATION,
            merge_threshold: DEFAULT_MERGE_THRESHOLD,
            lexicon: Lexicon::BUILTIN,
        }
    }

    /// Set the minimum scene duration in seconds.
    #[must_use]
    pub fn with_min_duration(mut self, seconds: f64) -> Self {
        self.min_duration = seconds;
        self
    }

    /// Set the merge threshold in seconds.
    #[must_use]
    pub fn with_merge_threshold(mut self, seconds: f64) -> Self {
        self.merge_threshold = seconds;
        self
    }

    /// Use custom keyword tables.
    #[must_use]
    pub fn with_lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = lexicon;
        self
    }

    /// Check that both thresholds are in range.
    ///
    /// # Errors
    ///
    /// - [`StoryboardError::InvalidMinDuration`] if `min_duration <= 0`,
    ///   NaN, infinite, or too large for a [`Duration`].
    /// - [`StoryboardError::InvalidMergeThreshold`] if `merge_threshold < 0`,
    ///   NaN, infinite, or too large for a [`Duration`].
    pub fn validate(&self) -> Result<(), StoryboardError> {
        self.durations().map(|_| ())
    }

    /// Validate and convert both thresholds to [`Duration`]s.
    ///
    /// Returns `(min_duration, merge_threshold)`.
    pub(crate) fn durations(&self) -> Result<(Duration, Duration), StoryboardError> {
        let min_duration = Duration::try_from_secs_f64(self.min_duration)
            .ok()
            .filter(|duration| !duration.is_zero())
            .ok_or(StoryboardError::InvalidMinDuration(self.min_duration))?;
        let merge_threshold = Duration::try_from_secs_f64(self.merge_threshold)
            .map_err(|_| StoryboardError::InvalidMergeThreshold(self.merge_threshold))?;
        Ok((min_duration, merge_threshold))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = SegmentOptions::default();
        assert_eq!(options.min_duration, 5.0);
        assert_eq!(options.merge_threshold, 3.0);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn rejects_bad_min_duration() {
        for value in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let result = SegmentOptions::new().with_min_duration(value).validate();
            assert!(
                matches!(result, Err(StoryboardError::InvalidMinDuration(_))),
                "{value} should be rejected"
            );
        }
    }

    #[test]
    fn merge_threshold_may_be_zero() {
        assert!(SegmentOptions::new().with_merge_threshold(0.0).validate().is_ok());
        assert!(matches!(
            SegmentOptions::new().with_merge_threshold(-0.5).validate(),
            Err(StoryboardError::InvalidMergeThreshold(_))
        ));
    }

    #[test]
    fn rejects_thresholds_beyond_duration_range() {
        assert!(matches!(
            SegmentOptions::new().with_min_duration(1e20).durations(),
            Err(StoryboardError::InvalidMinDuration(_))
        ));
        assert!(matches!(
            SegmentOptions::new().with_merge_threshold(f64::MAX).durations(),
            Err(StoryboardError::InvalidMergeThreshold(_))
        ));
    }

    #[test]
    fn durations_convert_seconds() {
        let (min, threshold) = SegmentOptions::new()
            .with_min_duration(2.5)
            .with_merge_threshold(0.25)
            .durations()
            .unwrap();
        assert_eq!(min, Duration::from_millis(2500));
        assert_eq!(threshold, Duration::from_millis(250));
    }
}
