//! # storyboard
//!
//! Turn timestamped subtitle transcripts into scene-by-scene storyboards.
//!
//! `storyboard` partitions an ordered sequence of timed text cues into
//! scenes using lexical boundary keywords, merges scenes that are too short
//! into their neighbours, and annotates every scene with a location hint, an
//! emotional tone, and a truncated summary. The result is meant for
//! downstream per-scene video generation.
//!
//! ## Quick Start
//!
//! ### Build a Storyboard from an SRT File
//!
//! ```no_run
//! use storyboard::{ReportOptions, SegmentOptions, Storyboarder, StoryboardFormat, report, srt};
//!
//! let cues = srt::parse_file("chapter-01.srt")?;
//! let engine = Storyboarder::new(SegmentOptions::default())?;
//! let storyboard = engine.build(cues);
//! report::save("chapter-01.json", &storyboard, StoryboardFormat::Json, &ReportOptions::new())?;
//! # Ok::<(), storyboard::StoryboardError>(())
//! ```
//!
//! ### Tune the Thresholds
//!
//! ```
//! use std::time::Duration;
//! use storyboard::{Cue, SegmentOptions, build_storyboard};
//!
//! let options = SegmentOptions::new()
//!     .with_min_duration(8.0)
//!     .with_merge_threshold(2.0);
//!
//! let scenes = build_storyboard(
//!     vec![Cue::new(1, Duration::ZERO, Duration::from_secs(3), "风很大")],
//!     &options,
//! )?;
//! assert_eq!(scenes.len(), 1);
//! # Ok::<(), storyboard::StoryboardError>(())
//! ```
//!
//! ## How Segmentation Works
//!
//! 1. **Segment**: scan cues left to right. A cue containing a boundary
//!    keyword (location change, time skip, or scene transition, in that
//!    priority) closes the open scene, but only once the open scene has
//!    reached the minimum duration.
//! 2. **Merge**: scan scenes left to right. A scene still shorter than the
//!    minimum absorbs the following scene when the gap between them is within
//!    the merge threshold. The pass is greedy and never looks backward.
//! 3. **Renumber**: scene ids become `1..=N` in order.
//!
//! Cue order is trusted: callers must supply cues in chronological order
//! (see [`srt::sort_chronologically`]).
//!
//! ### Optional Features
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `rayon` | `build_storyboards_parallel()` processes independent transcripts on rayon threads |
//! | `full` | Enables all of the above |

pub mod cue;
pub mod error;
pub mod lexicon;
pub mod merger;
pub mod options;
#[cfg(feature = "rayon")]
mod parallel;
pub mod report;
pub mod scene;
pub mod segmenter;
pub mod srt;
pub mod storyboard;

pub use cue::Cue;
pub use error::StoryboardError;
pub use lexicon::{Boundary, BoundaryKind, Emotion, Lexicon};
pub use options::{DEFAULT_MERGE_THRESHOLD, DEFAULT_MIN_DURATION, SegmentOptions};
#[cfg(feature = "rayon")]
pub use parallel::build_storyboards_parallel;
pub use report::{ReportOptions, SceneRecord, StoryboardFormat};
pub use scene::{SUMMARY_MAX_CHARS, Scene};
pub use storyboard::{Storyboard, Storyboarder, build_storyboard};
