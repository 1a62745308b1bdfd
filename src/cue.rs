//! Timed subtitle cues.
//!
//! A [`Cue`] is one timestamped line of transcript text with a stable index
//! taken from its position in the source file. Cues are the unit of ownership
//! in the engine: every cue ends up in exactly one scene.

use std::time::Duration;

/// A single subtitle cue with timing and text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cue {
    /// Source-order index (SubRip counter, usually starting at 1).
    pub index: usize,
    /// When this cue starts displaying.
    pub start: Duration,
    /// When this cue stops displaying. Never earlier than `start` when the
    /// cue is built through [`Cue::new`].
    pub end: Duration,
    /// Text content, with line breaks already folded into spaces.
    pub text: String,
}

impl Cue {
    /// Create a cue.
    ///
    /// An `end` earlier than `start` violates the upstream contract. It is
    /// clamped to `start` (yielding a zero-length cue) and logged, so that no
    /// scene can ever report a negative duration.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use storyboard::Cue;
    ///
    /// let cue = Cue::new(1, Duration::from_secs(4), Duration::from_secs(2), "oops");
    /// assert_eq!(cue.end, cue.start);
    /// ```
    pub fn new(index: usize, start: Duration, end: Duration, text: impl Into<String>) -> Self {
        let end = if end < start {
            log::warn!(
                "Cue {index} ends before it starts ({start:?} > {end:?}); clamping end to start"
            );
            start
        } else {
            end
        };

        Self {
            index,
            start,
            end,
            text: text.into(),
        }
    }

    /// How long the cue is displayed.
    pub fn duration(&self) -> Duration {
        self.end.saturating_sub(self.start)
    }
}
