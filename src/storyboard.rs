//! The segmentation engine.
//!
//! [`Storyboarder`] ties the two passes together: it validates configuration
//! up front, segments the cue sequence, then merges short scenes. The engine
//! holds no mutable state, so one instance can serve any number of
//! independent transcripts, including from several threads at once.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use storyboard::{Cue, SegmentOptions, Storyboarder};
//!
//! let engine = Storyboarder::new(SegmentOptions::default())?;
//! let storyboard = engine.build(vec![
//!     Cue::new(1, Duration::ZERO, Duration::from_secs(4), "他来到一座高山"),
//!     Cue::new(2, Duration::from_secs(4), Duration::from_secs(9), "山顶风很大"),
//! ]);
//! assert_eq!(storyboard.scene_count(), 1);
//! # Ok::<(), storyboard::StoryboardError>(())
//! ```

use std::time::Duration;

use crate::cue::Cue;
use crate::error::StoryboardError;
use crate::lexicon::Lexicon;
use crate::merger;
use crate::options::SegmentOptions;
use crate::scene::Scene;
use crate::segmenter;

/// An ordered scene list for one chapter of a transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct Storyboard {
    /// Chapter number used when naming and rendering output.
    pub chapter: u32,
    /// Final scenes, ids `1..=N`.
    pub scenes: Vec<Scene>,
}

impl Storyboard {
    /// Wrap a finished scene list.
    pub fn new(chapter: u32, scenes: Vec<Scene>) -> Self {
        Self { chapter, scenes }
    }

    /// Number of scenes.
    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Sum of scene durations. Gaps between scenes are not counted.
    pub fn total_duration(&self) -> Duration {
        self.scenes.iter().map(Scene::duration).sum()
    }

    /// Total number of cues across all scenes.
    pub fn cue_count(&self) -> usize {
        self.scenes.iter().map(Scene::cue_count).sum()
    }
}

/// Validated segmentation engine.
#[derive(Debug, Clone, Copy)]
pub struct Storyboarder {
    min_duration: Duration,
    merge_threshold: Duration,
    lexicon: Lexicon,
    chapter: u32,
}

impl Storyboarder {
    /// Build an engine from `options`.
    ///
    /// # Errors
    ///
    /// Returns a configuration error from [`SegmentOptions::validate`].
    pub fn new(options: SegmentOptions) -> Result<Self, StoryboardError> {
        let (min_duration, merge_threshold) = options.durations()?;
        Ok(Self {
            min_duration,
            merge_threshold,
            lexicon: options.lexicon,
            chapter: 1,
        })
    }

    /// Set the chapter number stamped on built storyboards (default 1).
    #[must_use]
    pub fn with_chapter(mut self, chapter: u32) -> Self {
        self.chapter = chapter;
        self
    }

    /// Minimum scene duration.
    pub fn min_duration(&self) -> Duration {
        self.min_duration
    }

    /// Merge threshold.
    pub fn merge_threshold(&self) -> Duration {
        self.merge_threshold
    }

    /// Keyword tables in use.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Run only the first pass.
    pub fn segment<I>(&self, cues: I) -> Vec<Scene>
    where
        I: IntoIterator<Item = Cue>,
    {
        segmenter::segment(cues, self.min_duration, &self.lexicon)
    }

    /// Run only the second pass.
    pub fn merge_short(&self, scenes: Vec<Scene>) -> Vec<Scene> {
        merger::merge_short(scenes, self.min_duration, self.merge_threshold, &self.lexicon)
    }

    /// Segment and merge `cues` into final scenes.
    ///
    /// Cues must already be in chronological order; see
    /// [`srt::sort_chronologically`](crate::srt::sort_chronologically).
    pub fn scenes<I>(&self, cues: I) -> Vec<Scene>
    where
        I: IntoIterator<Item = Cue>,
    {
        let raw = self.segment(cues);
        self.merge_short(raw)
    }

    /// Segment and merge `cues` into a [`Storyboard`].
    pub fn build<I>(&self, cues: I) -> Storyboard
    where
        I: IntoIterator<Item = Cue>,
    {
        Storyboard::new(self.chapter, self.scenes(cues))
    }
}

/// Validate `options`, then segment and merge `cues`.
///
/// # Errors
///
/// Returns a configuration error before any cue is processed.
///
/// # Example
///
/// ```
/// use storyboard::{SegmentOptions, StoryboardError, build_storyboard};
///
/// let scenes = build_storyboard(Vec::new(), &SegmentOptions::default())?;
/// assert!(scenes.is_empty());
///
/// let error = build_storyboard(Vec::new(), &SegmentOptions::new().with_min_duration(0.0));
/// assert!(matches!(error, Err(StoryboardError::InvalidMinDuration(_))));
/// # Ok::<(), StoryboardError>(())
/// ```
pub fn build_storyboard<I>(cues: I, options: &SegmentOptions) -> Result<Vec<Scene>, StoryboardError>
where
    I: IntoIterator<Item = Cue>,
{
    Ok(Storyboarder::new(*options)?.scenes(cues))
}
