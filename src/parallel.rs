//! Parallel storyboard building.
//!
//! This module provides [`build_storyboards_parallel`], which distributes
//! independent transcripts (for example one per chapter) across [`rayon`]
//! worker threads. Each worker owns its cue list and produces its own scene
//! list; the only shared data is the read-only [`Storyboarder`].
//!
//! Available when the `rayon` feature is enabled.

use ::rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};

use crate::cue::Cue;
use crate::error::StoryboardError;
use crate::options::SegmentOptions;
use crate::storyboard::{Storyboard, Storyboarder};

/// Build one storyboard per transcript in parallel.
///
/// Configuration is validated once, before any transcript is touched.
/// Results come back in input order, with chapter numbers `1..=N` assigned
/// by position.
///
/// # Errors
///
/// Returns a configuration error from [`SegmentOptions::validate`].
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use storyboard::{Cue, SegmentOptions, build_storyboards_parallel};
///
/// let chapters = vec![
///     vec![Cue::new(1, Duration::ZERO, Duration::from_secs(6), "风很大")],
///     vec![],
/// ];
/// let boards = build_storyboards_parallel(chapters, &SegmentOptions::default())?;
/// assert_eq!(boards[0].chapter, 1);
/// assert_eq!(boards[1].scene_count(), 0);
/// # Ok::<(), storyboard::StoryboardError>(())
/// ```
pub fn build_storyboards_parallel(
    transcripts: Vec<Vec<Cue>>,
    options: &SegmentOptions,
) -> Result<Vec<Storyboard>, StoryboardError> {
    let engine = Storyboarder::new(*options)?;
    log::debug!(
        "Building {} storyboard(s) on {} rayon thread(s)",
        transcripts.len(),
        ::rayon::current_num_threads()
    );

    Ok(transcripts
        .into_par_iter()
        .enumerate()
        .map(|(position, cues)| engine.with_chapter(chapter_number(position)).build(cues))
        .collect())
}

fn chapter_number(position: usize) -> u32 {
    u32::try_from(position + 1).unwrap_or(u32::MAX)
}
