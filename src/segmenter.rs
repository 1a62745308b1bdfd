//! First pass: split a cue sequence into raw scenes.
//!
//! A single left-to-right scan. A boundary keyword closes the open scene only
//! once that scene has reached the minimum duration; earlier boundaries are
//! ignored and the cue simply joins the open scene. Short scenes are left for
//! the [merge pass](crate::merger) to clean up.

use std::time::Duration;

use crate::cue::Cue;
use crate::lexicon::Lexicon;
use crate::scene::Scene;

/// Partition `cues` into annotated raw scenes with ids `1..=N`.
///
/// Cues are consumed in the order given and never re-sorted. Empty input
/// yields an empty list. The final scene is emitted even when it is shorter
/// than `min_duration`.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use storyboard::{Cue, Lexicon, segmenter::segment};
///
/// let cues = vec![
///     Cue::new(1, Duration::from_secs(0), Duration::from_secs(6), "风很大"),
///     Cue::new(2, Duration::from_secs(6), Duration::from_secs(8), "第二天，雨停了"),
/// ];
/// let scenes = segment(cues, Duration::from_secs(5), &Lexicon::BUILTIN);
/// assert_eq!(scenes.len(), 2);
/// assert_eq!(scenes[1].boundary_reason(), "time skip: 第二天");
/// ```
pub fn segment<I>(cues: I, min_duration: Duration, lexicon: &Lexicon) -> Vec<Scene>
where
    I: IntoIterator<Item = Cue>,
{
    let mut scenes = Vec::new();
    let mut current = Scene::new(1);
    let mut prev_text = String::new();

    for cue in cues {
        if let Some(boundary) = lexicon.detect_boundary(&cue.text, &prev_text) {
            if !current.is_empty() && current.duration() >= min_duration {
                log::trace!(
                    "Closing scene {} at cue {} ({})",
                    current.id,
                    cue.index,
                    boundary
                );
                let next = Scene::opened_by(scenes.len() + 2, boundary);
                let mut closed = std::mem::replace(&mut current, next);
                closed.annotate(lexicon);
                scenes.push(closed);
            } else {
                log::trace!(
                    "Ignoring boundary at cue {} ({}): open scene is {:?} long",
                    cue.index,
                    boundary,
                    current.duration()
                );
            }
        }

        prev_text.clone_from(&cue.text);
        current.push(cue);
    }

    if !current.is_empty() {
        current.annotate(lexicon);
        scenes.push(current);
    }

    log::debug!("Segmented transcript into {} raw scene(s)", scenes.len());
    scenes
}
